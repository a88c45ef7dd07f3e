//! Seeding and cache maintenance.

use crate::{
    extractors::ValidatedQuery,
    responses::{ok, ApiResult},
    state::AppState,
};
use roster_service::{MessageResponse, SeedRequest};
use axum::{
    extract::State,
    routing::{delete, post},
    Router,
};
use tracing::info;

/// Creates the admin router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/seed", post(seed))
        .route("/seed/", post(seed))
        .route("/cache", delete(clear_cache))
        .route("/cache/", delete(clear_cache))
}

/// Replace every stored user with generated records.
#[utoipa::path(
    post,
    path = "/seed/",
    tag = "admin",
    params(SeedRequest),
    responses(
        (status = 200, description = "Store reseeded", body = MessageResponse),
        (status = 422, description = "Count out of range", body = roster_core::ErrorResponse),
        (status = 500, description = "Seeding failed, store unchanged", body = roster_core::ErrorResponse)
    )
)]
pub async fn seed(
    State(state): State<AppState>,
    ValidatedQuery(request): ValidatedQuery<SeedRequest>,
) -> ApiResult<MessageResponse> {
    let inserted = state.user_service.seed(request.count).await?;
    info!(inserted, "Seed request completed");
    ok(MessageResponse::seeded(inserted))
}

/// Drop every cached response.
#[utoipa::path(
    delete,
    path = "/cache/",
    tag = "admin",
    responses(
        (status = 200, description = "Cache cleared", body = MessageResponse)
    )
)]
pub async fn clear_cache(State(state): State<AppState>) -> ApiResult<MessageResponse> {
    state.user_service.clear_cache().await?;
    ok(MessageResponse::cache_cleared())
}
