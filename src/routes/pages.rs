//! Handlers for the marketing pages: home, services, contact.
//!
//! Purely presentational; the content comes from the `site` module and the
//! UI config.

use axum::{extract::State, response::Html, Extension};
use tracing::instrument;

use crate::error::{AppError, AppErrorResponse, ResultExt};
use crate::middleware::RequestId;
use crate::site;
use crate::state::AppState;

use super::insert_base_context;

/// Landing page: hero, skills, services preview, pricing, contact.
#[instrument(name = "pages::home", skip(state, request_id))]
pub async fn home(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> Result<Html<String>, AppErrorResponse> {
    let mut context = tera::Context::new();
    insert_base_context(&mut context, &state);
    context.insert("skills", &site::skills());
    context.insert("services", &site::services());
    context.insert("projects", &site::projects());
    context.insert("pricing_tiers", &site::pricing_tiers());

    let html = state
        .tera
        .render("home.html", &context)
        .map_err(AppError::from)
        .with_request_id(&request_id)?;
    Ok(Html(html))
}

/// Services page.
#[instrument(name = "pages::services", skip(state, request_id))]
pub async fn services(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> Result<Html<String>, AppErrorResponse> {
    let mut context = tera::Context::new();
    insert_base_context(&mut context, &state);
    context.insert("services", &site::services());
    context.insert("pricing_tiers", &site::pricing_tiers());

    let html = state
        .tera
        .render("services.html", &context)
        .map_err(AppError::from)
        .with_request_id(&request_id)?;
    Ok(Html(html))
}

/// Contact page.
#[instrument(name = "pages::contact", skip(state, request_id))]
pub async fn contact(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> Result<Html<String>, AppErrorResponse> {
    let mut context = tera::Context::new();
    insert_base_context(&mut context, &state);

    let html = state
        .tera
        .render("contact.html", &context)
        .map_err(AppError::from)
        .with_request_id(&request_id)?;
    Ok(Html(html))
}
