//! Proxy API routes.
//!
//! Each route performs exactly one forwarding fetch against the content
//! service and relays the upstream JSON verbatim on success, or answers a
//! generic 500 with a static message on any failure. No auth, no rate
//! limiting, no transformation.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::instrument;

use crate::state::AppState;

/// GET /api/blog/categories
#[instrument(name = "api::categories", skip(state))]
pub async fn categories(State(state): State<AppState>) -> Response {
    relay(
        state.content.forward_get("blog/categories").await,
        "Failed to fetch categories",
    )
}

/// GET /api/blog/popular
#[instrument(name = "api::popular", skip(state))]
pub async fn popular(State(state): State<AppState>) -> Response {
    relay(
        state.content.forward_get("blog/popular").await,
        "Failed to fetch popular posts",
    )
}

/// GET /api/blog/recent
#[instrument(name = "api::recent", skip(state))]
pub async fn recent(State(state): State<AppState>) -> Response {
    relay(
        state.content.forward_get("blog/recent").await,
        "Failed to fetch recent posts",
    )
}

/// POST /api/blog/posts/{slug}/view
#[instrument(name = "api::track_view", skip(state), fields(slug = %slug))]
pub async fn track_view(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    let path = format!("how-to/{}/view", slug);
    relay(
        state.content.forward_post(&path).await,
        "Failed to track view",
    )
}

fn relay(result: Result<serde_json::Value, crate::error::AppError>, message: &str) -> Response {
    match result {
        Ok(value) => Json(value).into_response(),
        Err(error) => {
            tracing::error!(%error, "Proxy request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": message })),
            )
                .into_response()
        }
    }
}
