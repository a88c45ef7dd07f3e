//! REST API controllers.

pub mod admin_controller;
pub mod health_controller;
pub mod lookup_controller;
pub mod user_controller;

pub use health_controller::*;
