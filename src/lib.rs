//! Atelier - server-rendered portfolio and how-to guide site.
//!
//! A rendering and presentation client for a remote content API: marketing
//! pages, a guide section with search/filtering/carousels, best-effort view
//! tracking, proxy API routes, and SEO metadata.

pub mod config;
pub mod content;
pub mod error;
pub mod http;
pub mod middleware;
pub mod routes;
pub mod sanitize;
pub mod seo;
pub mod site;
pub mod state;
pub mod templates;
