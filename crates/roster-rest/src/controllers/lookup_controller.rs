//! Distinct values for filter dropdowns.

use crate::{
    responses::{ok, ApiResult},
    state::AppState,
};
use axum::{extract::State, routing::get, Router};

/// Creates the lookup router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/departments", get(list_departments))
        .route("/departments/", get(list_departments))
        .route("/roles", get(list_roles))
        .route("/roles/", get(list_roles))
}

/// List the distinct departments, sorted.
#[utoipa::path(
    get,
    path = "/departments/",
    tag = "lookups",
    responses(
        (status = 200, description = "Sorted department names", body = Vec<String>),
        (status = 500, description = "Store failure", body = roster_core::ErrorResponse)
    )
)]
pub async fn list_departments(State(state): State<AppState>) -> ApiResult<Vec<String>> {
    ok(state.user_service.list_departments().await?)
}

/// List the distinct roles, sorted.
#[utoipa::path(
    get,
    path = "/roles/",
    tag = "lookups",
    responses(
        (status = 200, description = "Sorted role names", body = Vec<String>),
        (status = 500, description = "Store failure", body = roster_core::ErrorResponse)
    )
)]
pub async fn list_roles(State(state): State<AppState>) -> ApiResult<Vec<String>> {
    ok(state.user_service.list_roles().await?)
}
