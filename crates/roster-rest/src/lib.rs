//! # Roster REST
//!
//! Axum HTTP surface for the user listing: list, lookup, seed, cache and
//! health endpoints plus generated OpenAPI docs.

pub mod controllers;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
