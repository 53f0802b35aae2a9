//! Shared application state for request handlers.

use std::sync::Arc;
use tera::Tera;

use crate::config::AppConfig;
use crate::content::ContentService;

/// Shared application state, cloneable across handlers via Arc-wrapped fields.
///
/// Contains the application configuration, Tera template engine, and the
/// content service client for the remote how-to API.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub tera: Arc<Tera>,
    pub content: ContentService,
}

impl AppState {
    pub fn new(config: AppConfig, tera: Tera, content: ContentService) -> Self {
        Self {
            config: Arc::new(config),
            tera: Arc::new(tera),
            content,
        }
    }
}
