//! Handler for the guide listing page.
//!
//! Coordinates the parallel fetches behind the listing's three view modes:
//! the default carousel view (featured + popular + recent + category filter),
//! the filtered grid (category/tag scoped fetch or client-side search), and
//! the paginated "view all" grid.

use axum::{
    extract::{Query, State},
    response::Html,
    Extension,
};
use serde::Deserialize;
use tracing::instrument;

use crate::config::{
    FEATURED_CAROUSEL_LIMIT, POSTS_PER_PAGE, SEARCH_FETCH_LIMIT, SECTION_CAROUSEL_LIMIT,
};
use crate::content::{extract_categories_from_posts, Post, PostQuery, Sort};
use crate::error::{AppError, AppErrorResponse, ResultExt};
use crate::middleware::RequestId;
use crate::state::AppState;

use super::insert_base_context;

/// Query parameters for the guide listing.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// Search query, matched client-side over title/excerpt/tags
    pub q: Option<String>,
    /// Category slug; triggers a category-scoped upstream fetch
    pub category: Option<String>,
    /// Tag slug; triggers a tag-scoped upstream fetch
    pub tag: Option<String>,
    pub sort: Option<String>,
    pub page: Option<usize>,
    /// "all" switches from carousels to the paginated grid
    pub view: Option<String>,
}

/// Pure filter over an already-fetched post batch: case-insensitive
/// substring match on title, excerpt, and tag names, optionally narrowed to
/// one category. Original post order is preserved.
pub fn filter_posts(posts: &[Post], category: Option<&str>, query: &str) -> Vec<Post> {
    let needle = query.to_lowercase();
    posts
        .iter()
        .filter(|post| match category {
            Some(slug) => post.category.slug == slug,
            None => true,
        })
        .filter(|post| {
            needle.is_empty()
                || post.title.to_lowercase().contains(&needle)
                || post.excerpt.to_lowercase().contains(&needle)
                || post
                    .tags
                    .iter()
                    .any(|tag| tag.name.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

/// Handler for the guide listing page.
#[instrument(name = "guides::list", skip(state, params, request_id))]
pub async fn list(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<ListParams>,
) -> Result<Html<String>, AppErrorResponse> {
    let sort = Sort::parse(params.sort.as_deref().unwrap_or("featured"));
    let page = params.page.unwrap_or(1).max(1);
    let search = params
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .unwrap_or("");
    let view_all = params.view.as_deref() == Some("all");

    let mut context = tera::Context::new();
    insert_base_context(&mut context, &state);
    context.insert("search_query", search);
    context.insert("sort", sort.as_str());
    context.insert("selected_category", &params.category);
    context.insert("selected_tag", &params.tag);
    context.insert("page", &page);

    if let Some(category) = params.category.as_deref() {
        // Category selection is filtered server-side by the content service
        let query = PostQuery {
            page: Some(page),
            limit: Some(POSTS_PER_PAGE),
            sort: Some(sort),
            ..Default::default()
        };
        let fetched = state.content.posts_by_category(category, &query).await;
        let posts = filter_posts(&fetched, None, search);
        let categories = state.content.categories().await;

        context.insert("mode", "grid");
        // Paging follows the upstream page size, not the filtered remainder
        context.insert("has_more", &(fetched.len() == POSTS_PER_PAGE));
        context.insert("posts", &posts);
        context.insert("categories", &categories);
    } else if let Some(tag) = params.tag.as_deref() {
        let query = PostQuery {
            page: Some(page),
            limit: Some(POSTS_PER_PAGE),
            sort: Some(sort),
            ..Default::default()
        };
        let fetched = state.content.posts_by_tag(tag, &query).await;
        let posts = filter_posts(&fetched, None, search);
        let categories = state.content.categories().await;

        context.insert("mode", "grid");
        context.insert("has_more", &(fetched.len() == POSTS_PER_PAGE));
        context.insert("posts", &posts);
        context.insert("categories", &categories);
    } else if !search.is_empty() {
        // The upstream has no search endpoint; fetch a wide page and filter here
        let query = PostQuery {
            limit: Some(SEARCH_FETCH_LIMIT),
            sort: Some(sort),
            ..Default::default()
        };
        let posts = state.content.list_posts(&query).await;
        let categories = fallback_categories(&state, &posts).await;
        let posts = filter_posts(&posts, None, search);

        context.insert("mode", "grid");
        context.insert("has_more", &false);
        context.insert("posts", &posts);
        context.insert("categories", &categories);
    } else if view_all {
        let query = PostQuery {
            page: Some(page),
            limit: Some(POSTS_PER_PAGE),
            sort: Some(sort),
            ..Default::default()
        };
        let posts = state.content.list_posts(&query).await;
        let categories = fallback_categories(&state, &posts).await;

        context.insert("mode", "all");
        context.insert("has_more", &(posts.len() == POSTS_PER_PAGE));
        context.insert("posts", &posts);
        context.insert("categories", &categories);
    } else {
        // Default carousel view: fan out all slices in parallel
        let all_query = PostQuery {
            page: Some(1),
            limit: Some(POSTS_PER_PAGE),
            sort: Some(sort),
            ..Default::default()
        };
        let popular_query = PostQuery {
            limit: Some(SECTION_CAROUSEL_LIMIT),
            sort: Some(Sort::Popular),
            ..Default::default()
        };
        let recent_query = PostQuery {
            limit: Some(SECTION_CAROUSEL_LIMIT),
            sort: Some(Sort::Recent),
            ..Default::default()
        };

        let (posts, featured, popular, recent, categories) = tokio::join!(
            state.content.list_posts(&all_query),
            state.content.featured_posts(1, FEATURED_CAROUSEL_LIMIT),
            state.content.list_posts(&popular_query),
            state.content.list_posts(&recent_query),
            state.content.categories(),
        );

        // The dedicated endpoint sometimes returns nothing; reconstruct the
        // filter bar from the batch we already have
        let categories = if categories.is_empty() {
            extract_categories_from_posts(&posts)
        } else {
            categories
        };

        context.insert("mode", "carousel");
        context.insert("has_more", &false);
        context.insert("posts", &posts);
        context.insert("featured_posts", &featured);
        context.insert("popular_posts", &popular);
        context.insert("recent_posts", &recent);
        context.insert("categories", &categories);
    }

    let html = state
        .tera
        .render("guides/list.html", &context)
        .map_err(AppError::from)
        .with_request_id(&request_id)?;
    Ok(Html(html))
}

/// Categories from the dedicated endpoint, reconstructed from the post batch
/// when that endpoint comes back empty.
async fn fallback_categories(
    state: &AppState,
    posts: &[Post],
) -> Vec<crate::content::Category> {
    let categories = state.content.categories().await;
    if categories.is_empty() {
        extract_categories_from_posts(posts)
    } else {
        categories
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::model::test_post;
    use crate::content::Tag;

    fn posts() -> Vec<Post> {
        let mut rust = test_post("axum-basics", "web-dev");
        rust.title = "Getting started with Axum".to_string();
        rust.tags.push(Tag {
            id: "t1".to_string(),
            name: "Rust".to_string(),
            slug: "rust".to_string(),
            color: String::new(),
        });

        let mut docker = test_post("docker-deploy", "devops");
        docker.title = "Deploying with Docker".to_string();
        docker.excerpt = "Ship containers to production".to_string();

        let mut react = test_post("react-hooks", "web-dev");
        react.title = "React hooks in practice".to_string();

        vec![rust, docker, react]
    }

    #[test]
    fn filter_is_order_preserving_and_deterministic() {
        let posts = posts();
        let first = filter_posts(&posts, None, "");
        let second = filter_posts(&posts, None, "");
        let slugs: Vec<_> = first.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["axum-basics", "docker-deploy", "react-hooks"]);
        assert_eq!(
            slugs,
            second.iter().map(|p| p.slug.as_str()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn filter_matches_title_excerpt_and_tags() {
        let posts = posts();
        // Title match, case-insensitive
        let by_title = filter_posts(&posts, None, "AXUM");
        assert_eq!(by_title.len(), 1);
        assert_eq!(by_title[0].slug, "axum-basics");
        // Excerpt match
        let by_excerpt = filter_posts(&posts, None, "containers");
        assert_eq!(by_excerpt.len(), 1);
        assert_eq!(by_excerpt[0].slug, "docker-deploy");
        // Tag name match
        let by_tag = filter_posts(&posts, None, "rust");
        assert_eq!(by_tag.len(), 1);
        assert_eq!(by_tag[0].slug, "axum-basics");
    }

    #[test]
    fn filter_narrows_by_category() {
        let posts = posts();
        let web = filter_posts(&posts, Some("web-dev"), "");
        assert_eq!(web.len(), 2);
        let none = filter_posts(&posts, Some("web-dev"), "docker");
        assert!(none.is_empty());
    }

    #[test]
    fn filter_of_empty_batch_is_empty() {
        assert!(filter_posts(&[], None, "anything").is_empty());
    }
}
