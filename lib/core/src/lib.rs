//! # TrackX Core
//!
//! Core library for the TrackX music recommendation service.
//!
//! This crate provides the fundamental data structures and algorithms:
//!
//! - [`Song`] - A catalog row (track id, name, artist, genre)
//! - [`Vector`] / [`FeatureMatrix`] - Dense feature representation of songs
//! - [`Catalog`] - The combined song + feature store with pagination and search
//! - [`BallTree`] - Exact k-nearest-neighbor index over the feature rows
//! - [`RecommendationEngine`] - Seed tracks in, ranked neighbors out
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use trackx_core::{BallTree, Catalog, FeatureMatrix, RecommendationEngine, Song};
//!
//! let songs = vec![
//!     Song::new("t1").with_track_name("First"),
//!     Song::new("t2").with_track_name("Second"),
//!     Song::new("t3").with_track_name("Third"),
//! ];
//! let features = FeatureMatrix::from_rows(&[vec![0.0], vec![0.1], vec![0.9]]).unwrap();
//!
//! let index = Arc::new(BallTree::build(&features));
//! let catalog = Arc::new(Catalog::new(songs, features).unwrap());
//!
//! let engine = RecommendationEngine::new(catalog, index);
//! let recs = engine.recommend(&["t1".to_string()], 2);
//! assert_eq!(recs[0].track_id, "t2");
//! ```

pub mod balltree;
pub mod catalog;
pub mod error;
pub mod matrix;
pub mod recommend;
pub mod song;
pub mod vector;

pub use balltree::BallTree;
pub use catalog::{Catalog, CatalogEntry, SongPage};
pub use error::{Error, Result};
pub use matrix::FeatureMatrix;
pub use recommend::{Recommendation, RecommendationEngine, OVERFETCH_MARGIN};
pub use song::Song;
pub use vector::Vector;
