//! # TrackX
//!
//! A music-track recommendation service backed by a precomputed
//! k-nearest-neighbors index over song feature vectors.
//!
//! The catalog, the feature matrix and the neighbor model are loaded once at
//! startup, validated against each other and shared read-only across all
//! requests. Recommendations merge and deduplicate nearest neighbors across
//! one or more seed tracks, ranked by ascending feature distance.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! trackx --data-dir ./data --static-dir ./static --http-port 8080
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use trackx::prelude::*;
//! use std::sync::Arc;
//!
//! let songs = vec![
//!     Song::new("t1").with_track_name("First"),
//!     Song::new("t2").with_track_name("Second"),
//! ];
//! let features = FeatureMatrix::from_rows(&[vec![0.0], vec![0.1]]).unwrap();
//!
//! let index = Arc::new(BallTree::build(&features));
//! let catalog = Arc::new(Catalog::new(songs, features).unwrap());
//! let library = Library::from_parts(catalog, index).unwrap();
//!
//! let recs = library.engine().recommend(&["t1".to_string()], 5);
//! assert_eq!(recs[0].track_id, "t2");
//! ```
//!
//! ## Crate Structure
//!
//! - [`trackx-core`](https://docs.rs/trackx-core) - Catalog, ball-tree index, recommendation engine
//! - [`trackx-storage`](https://docs.rs/trackx-storage) - Startup artifacts and the [`Library`] loader
//! - [`trackx-api`](https://docs.rs/trackx-api) - actix-web REST surface

// Re-export core types
pub use trackx_core::{
    BallTree, Catalog, CatalogEntry, Error, FeatureMatrix, Recommendation, RecommendationEngine,
    Result, Song, SongPage, Vector, OVERFETCH_MARGIN,
};

// Re-export storage
pub use trackx_storage::Library;

// Re-export API
pub use trackx_api::RestApi;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        BallTree, Catalog, CatalogEntry, Error, FeatureMatrix, Library, Recommendation,
        RecommendationEngine, RestApi, Result, Song, SongPage, Vector,
    };
}
