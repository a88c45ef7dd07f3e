//! OpenAPI documentation configuration.
//!
//! This module provides OpenAPI/Swagger documentation generation for the REST API.

use crate::controllers::health_controller::{HealthResponse, ReadinessResponse};
use roster_core::{ErrorResponse, FieldError, User};
use roster_service::{MessageResponse, UserListResponse};
use utoipa::OpenApi;

/// OpenAPI documentation for the Roster API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Data Table API",
        version = "1.0.0",
        description = "Paginated, filterable and sortable user listing",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    paths(
        // User endpoints
        crate::controllers::user_controller::list_users,
        // Lookup endpoints
        crate::controllers::lookup_controller::list_departments,
        crate::controllers::lookup_controller::list_roles,
        // Admin endpoints
        crate::controllers::admin_controller::seed,
        crate::controllers::admin_controller::clear_cache,
        // Health endpoints
        crate::controllers::health_controller::health_check,
        crate::controllers::health_controller::readiness_check,
        crate::controllers::health_controller::liveness_check,
    ),
    components(
        schemas(
            User,
            UserListResponse,
            MessageResponse,
            ErrorResponse,
            FieldError,
            HealthResponse,
            ReadinessResponse,
        )
    ),
    tags(
        (name = "users", description = "User listing"),
        (name = "lookups", description = "Distinct filter values"),
        (name = "admin", description = "Seeding and cache maintenance"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;
