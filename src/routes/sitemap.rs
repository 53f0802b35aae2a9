//! Sitemap generation.
//!
//! Emits static page entries plus one entry per guide. An upstream failure
//! degrades to the static entries only; the sitemap never errors.

use axum::{extract::State, http::header, response::IntoResponse, Extension};
use chrono::{DateTime, NaiveDate, Utc};
use tracing::instrument;

use crate::config::SITEMAP_POST_LIMIT;
use crate::content::{Post, PostQuery};
use crate::middleware::RequestId;
use crate::state::AppState;

/// Handler for /sitemap.xml.
#[instrument(name = "sitemap::sitemap", skip(state, _request_id))]
pub async fn sitemap(
    State(state): State<AppState>,
    Extension(_request_id): Extension<RequestId>,
) -> impl IntoResponse {
    let query = PostQuery {
        limit: Some(SITEMAP_POST_LIMIT),
        ..Default::default()
    };
    let posts = state.content.list_posts(&query).await;
    let xml = build_sitemap(&state.config.ui.base_url, &posts, Utc::now().date_naive());

    ([(header::CONTENT_TYPE, "application/xml")], xml)
}

/// Builds the sitemap XML for the static pages and a post batch.
fn build_sitemap(base_url: &str, posts: &[Post], today: NaiveDate) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );

    let today = today.format("%Y-%m-%d").to_string();
    push_entry(&mut xml, base_url, "", &today, "weekly", "1.0");
    push_entry(&mut xml, base_url, "/services", &today, "monthly", "0.9");
    push_entry(&mut xml, base_url, "/contact", &today, "monthly", "0.8");
    push_entry(&mut xml, base_url, "/how-to", &today, "daily", "0.9");

    for post in posts {
        let lastmod = DateTime::parse_from_rfc3339(&post.published_at)
            .map(|dt| dt.date_naive().format("%Y-%m-%d").to_string())
            .unwrap_or_else(|_| today.clone());
        let priority = if post.featured { "0.8" } else { "0.7" };
        let path = format!("/how-to/{}", post.slug);
        push_entry(&mut xml, base_url, &path, &lastmod, "monthly", priority);
    }

    xml.push_str("</urlset>\n");
    xml
}

fn push_entry(
    xml: &mut String,
    base_url: &str,
    path: &str,
    lastmod: &str,
    changefreq: &str,
    priority: &str,
) {
    xml.push_str(&format!(
        "  <url>\n    <loc>{}{}</loc>\n    <lastmod>{}</lastmod>\n    \
         <changefreq>{}</changefreq>\n    <priority>{}</priority>\n  </url>\n",
        base_url, path, lastmod, changefreq, priority
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::model::test_post;

    #[test]
    fn sitemap_includes_static_pages_and_posts() {
        let mut featured = test_post("deploy-axum", "web-dev");
        featured.featured = true;
        featured.published_at = "2025-03-01T12:00:00Z".to_string();
        let plain = test_post("react-hooks", "web-dev");

        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let xml = build_sitemap("https://example.com", &[featured, plain], today);

        assert!(xml.contains("<loc>https://example.com</loc>"));
        assert!(xml.contains("<loc>https://example.com/how-to</loc>"));
        assert!(xml.contains("<loc>https://example.com/how-to/deploy-axum</loc>"));
        assert!(xml.contains("<lastmod>2025-03-01</lastmod>"));
        // Featured posts rank higher
        let featured_at = xml.find("deploy-axum").unwrap();
        assert!(xml[featured_at..].contains("<priority>0.8</priority>"));
    }

    #[test]
    fn upstream_failure_degrades_to_static_entries() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let xml = build_sitemap("https://example.com", &[], today);
        assert_eq!(xml.matches("<url>").count(), 4);
    }

    #[test]
    fn unparseable_dates_fall_back_to_today() {
        let mut post = test_post("odd-date", "web-dev");
        post.published_at = "yesterday-ish".to_string();
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let xml = build_sitemap("https://example.com", &[post], today);
        assert!(xml.contains("<lastmod>2025-06-01</lastmod>"));
    }
}
