//! HTTP route handlers for the site.
//!
//! Routes are organized by content type, with per-route Cache-Control
//! headers. Guide pages revalidate on the upstream service's cadence, the
//! guide listing uses a short TTL, and static assets cache long with an
//! immutable hint.
//!
//! Request tracing is enabled via middleware that generates a unique request
//! ID for each incoming request, allowing correlation of all logs within a
//! request.

pub mod api;
pub mod guide;
pub mod guides;
pub mod health;
pub mod pages;
pub mod sitemap;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use http::header::{HeaderValue, CACHE_CONTROL};
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::{
    CACHE_CONTROL_GUIDE_LIST, CACHE_CONTROL_GUIDE_VIEW, CACHE_CONTROL_PAGE, CACHE_CONTROL_SITEMAP,
    CACHE_CONTROL_STATIC, STATIC_DIR,
};
use crate::middleware::request_id_layer;
use crate::state::AppState;

/// Insert the context every template expects: UI config and ad settings.
///
/// Ads are injected once per render here rather than per-component; the ad
/// network script itself is included a single time in the base layout.
pub fn insert_base_context(context: &mut tera::Context, state: &AppState) {
    context.insert("config", &state.config.ui);
    context.insert("ads", &state.config.ads);
    context.insert("ads_enabled", &state.config.ads.enabled());
    context.insert("ad_listing_slot", &state.config.ads.slot("listing"));
    context.insert("ad_article_slot", &state.config.ads.slot("article"));
}

/// Creates the Axum router with all routes and cache headers.
pub fn create_router(state: AppState) -> Router {
    // Marketing pages - content changes on deploy only
    let page_routes = Router::new()
        .route("/", get(pages::home))
        .route("/services", get(pages::services))
        .route("/contact", get(pages::contact))
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_PAGE),
        ));

    // Guide listing - shorter cache, new posts appear regularly
    let guide_list_routes = Router::new().route("/how-to", get(guides::list)).layer(
        SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_GUIDE_LIST),
        ),
    );

    // Guide view - revalidates with the upstream's cache window
    let guide_view_routes = Router::new()
        .route("/how-to/{slug}", get(guide::view))
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_GUIDE_VIEW),
        ));

    // Sitemap - crawled infrequently
    let sitemap_routes = Router::new()
        .route("/sitemap.xml", get(sitemap::sitemap))
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_SITEMAP),
        ));

    // Proxy API routes - no caching, JSON passthrough to the content service
    let api_routes = Router::new()
        .route("/api/blog/categories", get(api::categories))
        .route("/api/blog/popular", get(api::popular))
        .route("/api/blog/recent", get(api::recent))
        .route("/api/blog/posts/{slug}/view", post(api::track_view));

    // Static files - long cache with immutable hint
    let static_routes = Router::new()
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_STATIC),
        ));

    // Health check - no caching, always fresh for liveness probes
    let health_routes = Router::new().route("/health", get(health::health));

    Router::new()
        .merge(page_routes)
        .merge(guide_list_routes)
        .merge(guide_view_routes)
        .merge(sitemap_routes)
        .merge(api_routes)
        .merge(health_routes)
        .merge(static_routes)
        .with_state(state)
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}
