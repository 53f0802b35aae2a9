//! Read models for the remote content service.
//!
//! These mirror the JSON schema owned by the content API. Posts are treated
//! as immutable per request; nothing here is persisted locally.

use serde::{Deserialize, Serialize};

/// A single how-to article as served by the content API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    /// Full HTML body; absent in listing responses.
    #[serde(default)]
    pub content: Option<String>,
    /// Dedicated SEO description; falls back to the excerpt when absent.
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub thumbnail_url: String,
    #[serde(default)]
    pub author: String,
    pub category: Category,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub read_time: String,
    #[serde(default)]
    pub view_count: u64,
    #[serde(default)]
    pub published_at: String,
    #[serde(default)]
    pub created_at: String,
}

/// Classification metadata denormalized onto each post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub icon: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub color: String,
}

/// Payload for a best-effort view-tracking POST. Every field is optional;
/// delivery is never retried or confirmed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ViewEvent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referrer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

/// Derives a unique category list from a batch of posts.
///
/// Used when the dedicated categories endpoint returns nothing. One entry per
/// distinct category slug; the first-seen category's attributes win and the
/// first-seen order is preserved. Uniqueness only holds within the given
/// batch - a category appearing on a later page is only discovered by
/// extending the batch.
pub fn extract_categories_from_posts(posts: &[Post]) -> Vec<Category> {
    let mut seen = std::collections::HashSet::new();
    let mut categories = Vec::new();

    for post in posts {
        if seen.insert(post.category.slug.clone()) {
            categories.push(post.category.clone());
        }
    }

    categories
}

#[cfg(test)]
pub(crate) fn test_post(slug: &str, category_slug: &str) -> Post {
    Post {
        id: format!("id-{}", slug),
        slug: slug.to_string(),
        title: format!("Title {}", slug),
        excerpt: format!("Excerpt for {}", slug),
        content: None,
        meta_description: None,
        thumbnail_url: String::new(),
        author: "Zayn".to_string(),
        category: Category {
            id: format!("cat-{}", category_slug),
            name: category_slug.to_uppercase(),
            slug: category_slug.to_string(),
            color: "#6B7280".to_string(),
            icon: String::new(),
        },
        tags: Vec::new(),
        featured: false,
        read_time: "5 min read".to_string(),
        view_count: 0,
        published_at: "2025-01-01T00:00:00Z".to_string(),
        created_at: "2025-01-01T00:00:00Z".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_categories_dedupes_by_slug() {
        let mut first = test_post("a", "web-dev");
        first.category.name = "Web Development".to_string();
        let mut dup = test_post("b", "web-dev");
        dup.category.name = "Different Name Same Slug".to_string();
        let other = test_post("c", "devops");

        let categories = extract_categories_from_posts(&[first, dup, other]);

        assert_eq!(categories.len(), 2);
        // First-seen attributes win
        assert_eq!(categories[0].slug, "web-dev");
        assert_eq!(categories[0].name, "Web Development");
        assert_eq!(categories[1].slug, "devops");
    }

    #[test]
    fn extract_categories_empty_input() {
        assert!(extract_categories_from_posts(&[]).is_empty());
    }

    #[test]
    fn post_deserializes_with_missing_optionals() {
        let json = r#"{
            "id": "1",
            "slug": "hello",
            "title": "Hello",
            "category": {"id": "c1", "name": "Web", "slug": "web"}
        }"#;
        let post: Post = serde_json::from_str(json).expect("minimal post parses");
        assert_eq!(post.slug, "hello");
        assert!(post.tags.is_empty());
        assert!(!post.featured);
        assert!(post.content.is_none());
    }

    #[test]
    fn view_event_omits_absent_fields() {
        let event = ViewEvent {
            user_agent: Some("test-agent".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&event).expect("serializes");
        assert_eq!(json["user_agent"], "test-agent");
        assert!(json.get("ip_address").is_none());
        assert!(json.get("referrer").is_none());
    }
}
