//! Storage layer for TrackX.
//!
//! Reads the three startup artifacts (catalog CSV, bincode feature matrix,
//! bincode neighbor model), validates their alignment and assembles the
//! shared [`Library`]. Writer helpers exist for offline artifact production
//! and tests; the server itself never writes.

pub mod artifacts;
pub mod library;

pub use artifacts::{
    load_catalog, load_features, load_model, save_catalog, save_features, save_model,
};
pub use library::{Library, CATALOG_FILE, FEATURES_FILE, MODEL_FILE};
