//! HTTP client for the remote content service.
//!
//! `ContentService` wraps a shared `reqwest::Client` plus a short-TTL
//! response cache. The error contract is deliberate and blunt: network
//! failures, non-2xx statuses, and malformed JSON all collapse to a single
//! logged outcome, surfaced as an empty list / `None` / `false`. Callers
//! cannot distinguish "no results" from "request failed". There are no
//! retries and no backoff; the only hardening beyond that is a per-request
//! timeout so a hung upstream cannot hang a page render.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use reqwest::StatusCode;

use crate::config::ContentConfig;
use crate::error::AppError;

use super::model::{Category, Post, ViewEvent};

/// Server-defined sort orderings for post listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sort {
    Recent,
    Popular,
    Views,
    Featured,
}

impl Sort {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sort::Recent => "recent",
            Sort::Popular => "popular",
            Sort::Views => "views",
            Sort::Featured => "featured",
        }
    }

    /// Parses a sort name from a query parameter, defaulting to `Featured`.
    pub fn parse(value: &str) -> Sort {
        match value {
            "recent" => Sort::Recent,
            "popular" => Sort::Popular,
            "views" => Sort::Views,
            _ => Sort::Featured,
        }
    }
}

/// Pagination, sort, and filter parameters for post listings.
#[derive(Debug, Clone, Default)]
pub struct PostQuery {
    pub page: Option<usize>,
    pub limit: Option<usize>,
    pub sort: Option<Sort>,
    pub category: Option<String>,
    pub tag: Option<String>,
    pub featured: Option<bool>,
}

impl PostQuery {
    pub fn sorted(sort: Sort) -> Self {
        Self {
            sort: Some(sort),
            ..Default::default()
        }
    }

    /// Query parameters in a stable order; only set fields are emitted.
    fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(page) = self.page {
            params.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        if let Some(sort) = self.sort {
            params.push(("sort", sort.as_str().to_string()));
        }
        if let Some(category) = &self.category {
            params.push(("category", category.clone()));
        }
        if let Some(tag) = &self.tag {
            params.push(("tag", tag.clone()));
        }
        if let Some(featured) = self.featured {
            params.push(("featured", featured.to_string()));
        }
        params
    }
}

/// Cloneable handle to the content API.
#[derive(Clone)]
pub struct ContentService {
    inner: Arc<Inner>,
}

struct Inner {
    http: reqwest::Client,
    base_url: String,
    /// Successful list responses keyed by full request URL + query string.
    list_cache: Cache<String, Arc<Vec<Post>>>,
    /// Successful single-post responses keyed by slug.
    post_cache: Cache<String, Arc<Post>>,
}

impl ContentService {
    pub fn new(config: &ContentConfig) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .user_agent(concat!("atelier/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let ttl = Duration::from_secs(config.cache_ttl_seconds);
        let inner = Inner {
            http,
            base_url: config.base_url.clone(),
            list_cache: Cache::builder()
                .max_capacity(config.cache_capacity)
                .time_to_live(ttl)
                .build(),
            post_cache: Cache::builder()
                .max_capacity(config.cache_capacity)
                .time_to_live(ttl)
                .build(),
        };

        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// All posts, with pagination/sort/filter query parameters.
    pub async fn list_posts(&self, query: &PostQuery) -> Vec<Post> {
        let url = format!("{}/how-to", self.inner.base_url);
        self.fetch_posts(&url, query.to_params()).await
    }

    /// A single post by slug, including its HTML content. Returns `None` for
    /// a 404 as well as for any failure.
    pub async fn get_post(&self, slug: &str) -> Option<Post> {
        if let Some(post) = self.inner.post_cache.get(slug).await {
            return Some(post.as_ref().clone());
        }

        let url = format!("{}/how-to/{}", self.inner.base_url, slug);
        let response = match self.inner.http.get(&url).send().await {
            Ok(response) => response,
            Err(error) => {
                tracing::warn!(%url, %error, "Failed to fetch post");
                return None;
            }
        };

        if response.status() == StatusCode::NOT_FOUND {
            return None;
        }
        if !response.status().is_success() {
            tracing::warn!(%url, status = response.status().as_u16(), "Failed to fetch post");
            return None;
        }

        match response.json::<Post>().await {
            Ok(post) => {
                self.inner
                    .post_cache
                    .insert(slug.to_string(), Arc::new(post.clone()))
                    .await;
                Some(post)
            }
            Err(error) => {
                tracing::warn!(%url, %error, "Malformed post response");
                None
            }
        }
    }

    /// Featured posts via the dedicated endpoint.
    pub async fn featured_posts(&self, page: usize, limit: usize) -> Vec<Post> {
        let url = format!("{}/how-to/featured", self.inner.base_url);
        let params = vec![("page", page.to_string()), ("limit", limit.to_string())];
        self.fetch_posts(&url, params).await
    }

    /// Posts in a category, filtered server-side by the content service.
    pub async fn posts_by_category(&self, category: &str, query: &PostQuery) -> Vec<Post> {
        let url = format!("{}/how-to/category/{}", self.inner.base_url, category);
        self.fetch_posts(&url, query.to_params()).await
    }

    /// Posts carrying a tag, filtered server-side by the content service.
    pub async fn posts_by_tag(&self, tag: &str, query: &PostQuery) -> Vec<Post> {
        let url = format!("{}/how-to/tag/{}", self.inner.base_url, tag);
        self.fetch_posts(&url, query.to_params()).await
    }

    /// The dedicated category list. The upstream serves the blog metadata
    /// family under a `blog/` segment, unlike the `how-to/` post endpoints.
    /// It also wraps the response inconsistently (bare array,
    /// `{"categories": []}`, or `{"data": []}`); all three are accepted. An
    /// empty result here is what triggers the fallback extraction from a
    /// post batch.
    pub async fn categories(&self) -> Vec<Category> {
        let url = format!("{}/blog/categories", self.inner.base_url);
        let value = match self.get_json(&url).await {
            Ok(value) => value,
            Err(error) => {
                tracing::warn!(%url, %error, "Failed to fetch categories");
                return Vec::new();
            }
        };

        let list = value
            .get("categories")
            .or_else(|| value.get("data"))
            .unwrap_or(&value);

        match serde_json::from_value(list.clone()) {
            Ok(categories) => categories,
            Err(error) => {
                tracing::warn!(%url, %error, "Malformed categories response");
                Vec::new()
            }
        }
    }

    /// Fire-and-forget view tracking. Returns whether the upstream accepted
    /// the event; failure is logged and otherwise ignored. Duplicate views
    /// on refresh are possible and acceptable.
    pub async fn track_view(&self, slug: &str, event: &ViewEvent) -> bool {
        let url = format!("{}/how-to/{}/view", self.inner.base_url, slug);
        match self.inner.http.post(&url).json(event).send().await {
            Ok(response) => {
                let ok = response.status().is_success();
                if !ok {
                    tracing::warn!(%url, status = response.status().as_u16(), "View tracking rejected");
                }
                ok
            }
            Err(error) => {
                tracing::warn!(%url, %error, "View tracking failed");
                false
            }
        }
    }

    /// Raw JSON passthrough for the proxy routes: exactly one forwarding GET,
    /// upstream body relayed verbatim. Unlike the typed operations this
    /// propagates failure so the proxy can answer with a 500.
    pub async fn forward_get(&self, path: &str) -> Result<serde_json::Value, AppError> {
        let url = format!("{}/{}", self.inner.base_url, path);
        Ok(self.get_json(&url).await?)
    }

    /// Raw JSON passthrough for the view-tracking proxy route.
    pub async fn forward_post(&self, path: &str) -> Result<serde_json::Value, AppError> {
        let url = format!("{}/{}", self.inner.base_url, path);
        let response = self
            .inner
            .http
            .post(&url)
            .header(http::header::CONTENT_TYPE, "application/json")
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    async fn get_json(&self, url: &str) -> Result<serde_json::Value, reqwest::Error> {
        let response = self.inner.http.get(url).send().await?.error_for_status()?;
        response.json().await
    }

    /// Shared GET-and-parse path for list endpoints, with response caching.
    /// Only successful responses are cached; failures always degrade to an
    /// empty list so the next request retries the upstream.
    async fn fetch_posts(&self, url: &str, params: Vec<(&'static str, String)>) -> Vec<Post> {
        let cache_key = cache_key(url, &params);
        if let Some(posts) = self.inner.list_cache.get(&cache_key).await {
            return posts.as_ref().clone();
        }

        let response = match self.inner.http.get(url).query(&params).send().await {
            Ok(response) => response,
            Err(error) => {
                tracing::warn!(%url, %error, "Failed to fetch posts");
                return Vec::new();
            }
        };

        if !response.status().is_success() {
            tracing::warn!(%url, status = response.status().as_u16(), "Failed to fetch posts");
            return Vec::new();
        }

        match response.json::<Vec<Post>>().await {
            Ok(posts) => {
                self.inner
                    .list_cache
                    .insert(cache_key, Arc::new(posts.clone()))
                    .await;
                posts
            }
            Err(error) => {
                tracing::warn!(%url, %error, "Malformed posts response");
                Vec::new()
            }
        }
    }
}

fn cache_key(url: &str, params: &[(&'static str, String)]) -> String {
    let mut key = url.to_string();
    for (name, value) in params {
        key.push('&');
        key.push_str(name);
        key.push('=');
        key.push_str(value);
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_params_emit_only_set_fields() {
        let query = PostQuery {
            page: Some(2),
            limit: Some(20),
            sort: Some(Sort::Popular),
            ..Default::default()
        };
        assert_eq!(
            query.to_params(),
            vec![
                ("page", "2".to_string()),
                ("limit", "20".to_string()),
                ("sort", "popular".to_string()),
            ]
        );
    }

    #[test]
    fn empty_query_emits_no_params() {
        assert!(PostQuery::default().to_params().is_empty());
    }

    #[test]
    fn sort_parse_defaults_to_featured() {
        assert_eq!(Sort::parse("recent"), Sort::Recent);
        assert_eq!(Sort::parse("views"), Sort::Views);
        assert_eq!(Sort::parse("bogus"), Sort::Featured);
    }

    #[test]
    fn cache_keys_distinguish_param_sets() {
        let a = cache_key("http://x/how-to", &[("page", "1".to_string())]);
        let b = cache_key("http://x/how-to", &[("page", "2".to_string())]);
        assert_ne!(a, b);
    }
}
