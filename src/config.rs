//! Configuration loading and constants.
//!
//! Loads application configuration from TOML files and defines constants for
//! HTTP cache TTLs, pagination limits, SEO formatting, logging format, and
//! default paths. `AppConfig` is the root configuration struct.

use const_format::formatcp;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

// =============================================================================
// HTTP Response Cache Control
// =============================================================================
// These constants control Cache-Control headers for upstream caches (Varnish,
// nginx, CDNs). All values are in seconds. Directives used:
// - max-age: How long the response is considered fresh
// - stale-while-revalidate: Serve stale while fetching fresh in background
// - stale-if-error: Serve stale content if origin returns 5xx
//
// References:
// - RFC 9111 (HTTP Caching): https://httpwg.org/specs/rfc9111.html
// - RFC 5861 (stale-* extensions): https://httpwg.org/specs/rfc5861.html

/// Marketing pages (home, services, contact) - content changes on deploy
pub const HTTP_CACHE_PAGE_MAX_AGE: u32 = 60;
pub const HTTP_CACHE_PAGE_SWR: u32 = 30;

/// Guide listing - new posts appear regularly
pub const HTTP_CACHE_GUIDE_LIST_MAX_AGE: u32 = 30;
pub const HTTP_CACHE_GUIDE_LIST_SWR: u32 = 30;

/// Individual guides - revalidates on the same cadence the upstream service
/// caches at (5 minutes)
pub const HTTP_CACHE_GUIDE_VIEW_MAX_AGE: u32 = 300;
pub const HTTP_CACHE_GUIDE_VIEW_SWR: u32 = 60;

/// Sitemap - crawled infrequently
pub const HTTP_CACHE_SITEMAP_MAX_AGE: u32 = 3600;

/// Static assets (CSS, JS) - long cache with immutable hint
pub const HTTP_CACHE_STATIC_MAX_AGE: u32 = 86400;

/// Stale-if-error duration - serve stale content during backend failures (5 minutes)
pub const HTTP_CACHE_STALE_IF_ERROR: u32 = 300;

// Pre-formatted Cache-Control header values (compile-time string concatenation)
pub const CACHE_CONTROL_PAGE: &str = formatcp!(
    "public, max-age={}, stale-while-revalidate={}, stale-if-error={}",
    HTTP_CACHE_PAGE_MAX_AGE,
    HTTP_CACHE_PAGE_SWR,
    HTTP_CACHE_STALE_IF_ERROR
);

pub const CACHE_CONTROL_GUIDE_LIST: &str = formatcp!(
    "public, max-age={}, stale-while-revalidate={}, stale-if-error={}",
    HTTP_CACHE_GUIDE_LIST_MAX_AGE,
    HTTP_CACHE_GUIDE_LIST_SWR,
    HTTP_CACHE_STALE_IF_ERROR
);

pub const CACHE_CONTROL_GUIDE_VIEW: &str = formatcp!(
    "public, max-age={}, stale-while-revalidate={}, stale-if-error={}",
    HTTP_CACHE_GUIDE_VIEW_MAX_AGE,
    HTTP_CACHE_GUIDE_VIEW_SWR,
    HTTP_CACHE_STALE_IF_ERROR
);

pub const CACHE_CONTROL_SITEMAP: &str =
    formatcp!("public, max-age={}", HTTP_CACHE_SITEMAP_MAX_AGE);

pub const CACHE_CONTROL_STATIC: &str =
    formatcp!("public, max-age={}, immutable", HTTP_CACHE_STATIC_MAX_AGE);

// =============================================================================
// Guide Listing Constants
// =============================================================================

/// Posts per page in the "view all" grid and category/tag grids
pub const POSTS_PER_PAGE: usize = 20;

/// Featured posts shown in the hero carousel
pub const FEATURED_CAROUSEL_LIMIT: usize = 6;

/// Posts per section carousel (popular, recent)
pub const SECTION_CAROUSEL_LIMIT: usize = 10;

/// Wide page fetched when a search query is active; the upstream API has no
/// search endpoint, so filtering happens here over this window
pub const SEARCH_FETCH_LIMIT: usize = 100;

/// Maximum posts pulled into the sitemap
pub const SITEMAP_POST_LIMIT: usize = 1000;

// =============================================================================
// SEO / Formatting Constants
// =============================================================================

/// Maximum length of a meta description before truncation
pub const META_DESCRIPTION_MAX: usize = 160;

/// Reading speed used for read-time estimates
pub const WORDS_PER_MINUTE: usize = 200;

/// A post counts as "recently published" within this many days
pub const RECENT_WINDOW_DAYS: i64 = 7;

// Time unit constants (in seconds) for the timeago filter
/// Seconds in a minute
pub const SECONDS_PER_MINUTE: i64 = 60;
/// Seconds in an hour
pub const SECONDS_PER_HOUR: i64 = 3600;
/// Seconds in a day
pub const SECONDS_PER_DAY: i64 = 86400;
/// Seconds in a 30-day month
pub const SECONDS_PER_MONTH: i64 = 2592000;
/// Seconds in a 365-day year
pub const SECONDS_PER_YEAR: i64 = 31536000;

// =============================================================================
// Default Paths and Strings
// =============================================================================

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Glob pattern for template files
pub const TEMPLATE_GLOB: &str = "templates/**/*";

/// Directory for static files
pub const STATIC_DIR: &str = "static";

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "atelier=debug,tower_http=debug";

/// Default log format (text or json)
pub const DEFAULT_LOG_FORMAT: &str = "text";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    pub http: HttpServerConfig,
    /// Upstream content service settings
    pub content: ContentConfig,
    pub ui: UiConfig,
    /// Ad network configuration
    #[serde(default)]
    pub ads: AdsConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    pub host: String,
    pub port: u16,
}

/// Upstream content service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ContentConfig {
    /// Base URL of the content API, without a trailing slash
    /// (e.g. "http://localhost:8000/api")
    pub base_url: String,
    /// Per-request timeout in seconds
    #[serde(default = "ContentConfig::default_request_timeout")]
    pub request_timeout_seconds: u64,
    /// TTL for cached upstream responses in seconds (default: 5 minutes,
    /// matching the upstream service's own revalidation window)
    #[serde(default = "ContentConfig::default_cache_ttl")]
    pub cache_ttl_seconds: u64,
    /// Maximum number of cached upstream responses
    #[serde(default = "ContentConfig::default_cache_capacity")]
    pub cache_capacity: u64,
}

impl ContentConfig {
    fn default_request_timeout() -> u64 {
        10
    }

    fn default_cache_ttl() -> u64 {
        300
    }

    fn default_cache_capacity() -> u64 {
        1000
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UiConfig {
    /// Site title shown in the header and page titles
    pub site_name: String,
    /// Absolute base URL of the public site, used for sitemap entries and
    /// structured data (e.g. "https://example.com"), no trailing slash
    pub base_url: String,
    /// Short strapline shown under the hero heading
    #[serde(default)]
    pub tagline: Option<String>,
    /// Contact email shown on the contact page
    #[serde(default)]
    pub contact_email: Option<String>,
    /// Version string, populated at runtime
    #[serde(skip_deserializing, default = "UiConfig::default_version")]
    pub version: String,
}

impl UiConfig {
    fn default_version() -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }
}

/// Ad network configuration.
///
/// The publisher ID and ad unit IDs come from the ad network dashboard. Ads
/// are disabled entirely when no publisher ID is configured; templates then
/// render without ad slots and without the network script.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AdsConfig {
    /// Ad network publisher ID (e.g. "ca-pub-0000000000000000")
    #[serde(default)]
    pub publisher_id: Option<String>,
    /// Named ad unit IDs keyed by placement (e.g. "listing_sidebar")
    #[serde(default)]
    pub units: BTreeMap<String, String>,
}

impl AdsConfig {
    /// Whether ads are configured at all.
    pub fn enabled(&self) -> bool {
        self.publisher_id.is_some()
    }

    /// Full slot identifier for a named placement: `{publisher_id}/{unit_id}`.
    pub fn slot(&self, placement: &str) -> Option<String> {
        let publisher = self.publisher_id.as_ref()?;
        let unit = self.units.get(placement)?;
        Some(format!("{}/{}", publisher, unit))
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log format: "text" (human-readable, default) or "json" (structured)
    #[serde(default = "LoggingConfig::default_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: DEFAULT_LOG_FORMAT.to_string(),
        }
    }
}

impl LoggingConfig {
    fn default_format() -> String {
        DEFAULT_LOG_FORMAT.to_string()
    }
}

impl AppConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;

        if config.content.base_url.is_empty() {
            return Err(ConfigError::Validation(
                "content.base_url must be set to the content API base URL".to_string(),
            ));
        }
        if config.content.base_url.ends_with('/') {
            return Err(ConfigError::Validation(
                "content.base_url must not end with a trailing slash".to_string(),
            ));
        }

        Ok(config)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("create temp config");
        file.write_all(contents.as_bytes()).expect("write config");
        file
    }

    #[test]
    fn load_minimal_config() {
        let file = write_config(
            r#"
[http]
host = "127.0.0.1"
port = 3000

[content]
base_url = "http://localhost:8000/api"

[ui]
site_name = "Atelier"
base_url = "https://example.com"
"#,
        );

        let config = AppConfig::load(file.path()).expect("config loads");
        assert_eq!(config.http.port, 3000);
        assert_eq!(config.content.request_timeout_seconds, 10);
        assert_eq!(config.content.cache_ttl_seconds, 300);
        assert_eq!(config.logging.format, "text");
        assert!(!config.ads.enabled());
    }

    #[test]
    fn trailing_slash_in_base_url_rejected() {
        let file = write_config(
            r#"
[http]
host = "127.0.0.1"
port = 3000

[content]
base_url = "http://localhost:8000/api/"

[ui]
site_name = "Atelier"
base_url = "https://example.com"
"#,
        );

        assert!(matches!(
            AppConfig::load(file.path()),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn ad_slot_joins_publisher_and_unit() {
        let ads = AdsConfig {
            publisher_id: Some("ca-pub-123".to_string()),
            units: [("listing_sidebar".to_string(), "456".to_string())]
                .into_iter()
                .collect(),
        };
        assert_eq!(
            ads.slot("listing_sidebar").as_deref(),
            Some("ca-pub-123/456")
        );
        assert_eq!(ads.slot("unknown"), None);
    }
}
