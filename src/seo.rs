//! SEO metadata helpers: meta descriptions, structured data, and the small
//! formatting utilities the guide templates share.

use chrono::{DateTime, Duration, Utc};

use crate::config::{META_DESCRIPTION_MAX, RECENT_WINDOW_DAYS, WORDS_PER_MINUTE};
use crate::content::Post;

/// Meta description for a post: the dedicated field when present, otherwise
/// the excerpt, truncated to 160 characters with an ellipsis.
pub fn meta_description(post: &Post) -> String {
    let description = post
        .meta_description
        .as_deref()
        .unwrap_or(&post.excerpt)
        .to_string();

    if description.chars().count() > META_DESCRIPTION_MAX {
        let truncated: String = description.chars().take(META_DESCRIPTION_MAX - 3).collect();
        format!("{}...", truncated)
    } else {
        description
    }
}

/// schema.org HowTo structured data for a guide page, embedded as JSON-LD.
pub fn structured_data(post: &Post, site_name: &str, site_base: &str) -> serde_json::Value {
    serde_json::json!({
        "@context": "https://schema.org",
        "@type": "HowTo",
        "name": post.title,
        "description": post.excerpt,
        "image": post.thumbnail_url,
        "author": {
            "@type": "Person",
            "name": post.author,
        },
        "datePublished": post.published_at,
        "dateModified": post.created_at,
        "publisher": {
            "@type": "Organization",
            "name": site_name,
        },
        "mainEntityOfPage": {
            "@type": "WebPage",
            "@id": format!("{}/how-to/{}", site_base, post.slug),
        },
    })
}

/// Formats a view count with K/M suffixes ("1.2K", "3.4M").
pub fn format_view_count(count: u64) -> String {
    if count >= 1_000_000 {
        format!("{:.1}M", count as f64 / 1_000_000.0)
    } else if count >= 1_000 {
        format!("{:.1}K", count as f64 / 1_000.0)
    } else {
        count.to_string()
    }
}

/// Reading-time estimate at 200 words per minute, rounded up.
pub fn estimate_reading_time(content: &str) -> String {
    let words = content.split_whitespace().count();
    let minutes = words.div_ceil(WORDS_PER_MINUTE).max(1);
    format!("{} min read", minutes)
}

/// Whether a post was published within the last 7 days.
pub fn is_recently_published(published_at: &str) -> bool {
    match DateTime::parse_from_rfc3339(published_at) {
        Ok(date) => {
            let cutoff = Utc::now() - Duration::days(RECENT_WINDOW_DAYS);
            date.with_timezone(&Utc) > cutoff
        }
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::model::test_post;

    #[test]
    fn meta_description_prefers_dedicated_field() {
        let mut post = test_post("a", "web-dev");
        post.meta_description = Some("Dedicated description".to_string());
        post.excerpt = "Excerpt".to_string();
        assert_eq!(meta_description(&post), "Dedicated description");
    }

    #[test]
    fn meta_description_falls_back_to_excerpt_and_truncates() {
        let mut post = test_post("a", "web-dev");
        post.meta_description = None;
        post.excerpt = "x".repeat(200);
        let description = meta_description(&post);
        assert_eq!(description.chars().count(), 160);
        assert!(description.ends_with("..."));
    }

    #[test]
    fn structured_data_points_at_guide_url() {
        let post = test_post("deploy-axum", "web-dev");
        let data = structured_data(&post, "Atelier", "https://example.com");
        assert_eq!(data["@type"], "HowTo");
        assert_eq!(
            data["mainEntityOfPage"]["@id"],
            "https://example.com/how-to/deploy-axum"
        );
    }

    #[test]
    fn view_counts_get_suffixes() {
        assert_eq!(format_view_count(999), "999");
        assert_eq!(format_view_count(1_200), "1.2K");
        assert_eq!(format_view_count(3_400_000), "3.4M");
    }

    #[test]
    fn reading_time_rounds_up() {
        let words_300 = "word ".repeat(300);
        assert_eq!(estimate_reading_time(&words_300), "2 min read");
        assert_eq!(estimate_reading_time("short"), "1 min read");
    }

    #[test]
    fn recently_published_window() {
        let yesterday = (Utc::now() - Duration::days(1)).to_rfc3339();
        let last_month = (Utc::now() - Duration::days(30)).to_rfc3339();
        assert!(is_recently_published(&yesterday));
        assert!(!is_recently_published(&last_month));
        assert!(!is_recently_published("not-a-date"));
    }
}
