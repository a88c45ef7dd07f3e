//! Record model for the user directory.

pub mod user;

pub use user::*;
