//! Client for the remote how-to content service.
//!
//! All post, category, tag, and view-count data is owned by the external
//! service; this module fetches it and nothing more. See `client` for the
//! degrade-to-empty error contract.

pub mod client;
pub mod model;

pub use client::{ContentService, PostQuery, Sort};
pub use model::{extract_categories_from_posts, Category, Post, Tag, ViewEvent};
