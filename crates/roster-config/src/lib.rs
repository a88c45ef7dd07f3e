//! # Roster Config
//!
//! Configuration management for the Roster user directory.
//! Supports layered configuration from files, environment variables,
//! and the well-known unprefixed deployment variables.

mod app_config;
mod loader;
mod validation;

pub use app_config::*;
pub use loader::*;
pub use validation::*;
