//! REST API for TrackX.
//!
//! actix-web surface over the shared [`trackx_storage::Library`]:
//! recommendations, catalog listing, substring search and static assets.

pub mod rest;

pub use rest::{routes, RestApi};
