//! Handler for viewing a single guide by slug.
//!
//! Fires a best-effort view-tracking call in the background; tracking
//! failures never affect the rendered page.

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    Extension,
};
use tracing::instrument;

use crate::content::ViewEvent;
use crate::error::{AppError, AppErrorResponse, ResultExt};
use crate::middleware::RequestId;
use crate::sanitize;
use crate::seo;
use crate::state::AppState;

use super::insert_base_context;

/// Handler for a single guide page.
#[instrument(name = "guide::view", skip(state, request_id, headers), fields(slug = %slug))]
pub async fn view(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(slug): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppErrorResponse> {
    let Some(post) = state.content.get_post(&slug).await else {
        return not_found(&state, &request_id);
    };

    // Best-effort view tracking in the background: never blocks the render,
    // never retried, outcome ignored beyond the client's own logging
    let event = ViewEvent {
        user_agent: header_value(&headers, header::USER_AGENT),
        referrer: header_value(&headers, header::REFERER),
        ..Default::default()
    };
    let content = state.content.clone();
    let tracked_slug = slug.clone();
    tokio::spawn(async move {
        content.track_view(&tracked_slug, &event).await;
    });

    let content_html = post.content.as_deref().map(sanitize::clean);
    let read_time = if post.read_time.is_empty() {
        post.content
            .as_deref()
            .map(seo::estimate_reading_time)
            .unwrap_or_else(|| "1 min read".to_string())
    } else {
        post.read_time.clone()
    };

    let mut context = tera::Context::new();
    insert_base_context(&mut context, &state);
    context.insert("post", &post);
    context.insert("content_html", &content_html);
    context.insert("read_time", &read_time);
    context.insert("meta_description", &seo::meta_description(&post));
    context.insert(
        "structured_data",
        &seo::structured_data(&post, &state.config.ui.site_name, &state.config.ui.base_url)
            .to_string(),
    );
    context.insert(
        "recently_published",
        &seo::is_recently_published(&post.published_at),
    );

    let html = state
        .tera
        .render("guides/view.html", &context)
        .map_err(AppError::from)
        .with_request_id(&request_id)?;
    Ok(Html(html).into_response())
}

/// Renders the guide not-found view with a 404 status.
fn not_found(state: &AppState, request_id: &RequestId) -> Result<Response, AppErrorResponse> {
    let mut context = tera::Context::new();
    insert_base_context(&mut context, state);

    let html = state
        .tera
        .render("guides/not_found.html", &context)
        .map_err(AppError::from)
        .with_request_id(request_id)?;
    Ok((StatusCode::NOT_FOUND, Html(html)).into_response())
}

fn header_value(headers: &HeaderMap, name: header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}
