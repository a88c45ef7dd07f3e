//! # Roster Service
//!
//! Business logic for the user listing: a TTL response cache in front of
//! the repository, the synthetic data seeder and the [`UserService`] facade
//! the REST layer talks to.

pub mod cache;
pub mod dto;
pub mod r#impl;
pub mod seed;
pub mod user_service;

pub use cache::*;
pub use dto::*;
pub use r#impl::*;
pub use seed::*;
pub use user_service::*;
