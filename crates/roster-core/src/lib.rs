//! # Roster Core
//!
//! Core types, traits, and error definitions for the Roster user directory.
//! Every other crate in the workspace builds on the record model, the query
//! request types, and the unified error defined here.

pub mod domain;
pub mod error;
pub mod pagination;
pub mod query;
pub mod result;
pub mod traits;
pub mod validation;

pub use domain::*;
pub use error::*;
pub use pagination::*;
pub use query::*;
pub use result::*;
pub use traits::*;
pub use validation::*;

// Re-export shaku's interface bound for component traits
pub use shaku::Interface;
