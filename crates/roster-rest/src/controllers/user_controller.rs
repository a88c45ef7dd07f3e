//! User listing controller.

use crate::{
    extractors::ValidatedQuery,
    responses::{ok, ApiResult},
    state::AppState,
};
use roster_service::{ListUsersRequest, UserListResponse};
use axum::{extract::State, routing::get, Router};
use tracing::debug;

/// Creates the user router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/", get(list_users))
}

/// List users with pagination, filtering and sorting.
#[utoipa::path(
    get,
    path = "/users/",
    tag = "users",
    params(ListUsersRequest),
    responses(
        (status = 200, description = "One page of users", body = UserListResponse),
        (status = 400, description = "Malformed query parameter", body = roster_core::ErrorResponse),
        (status = 422, description = "Query parameter out of range", body = roster_core::ErrorResponse),
        (status = 500, description = "Store failure", body = roster_core::ErrorResponse)
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    ValidatedQuery(request): ValidatedQuery<ListUsersRequest>,
) -> ApiResult<UserListResponse> {
    debug!(skip = request.skip, limit = request.limit, "List users request");

    let response = state.user_service.list_users(request.into_query()).await?;
    ok(response)
}
