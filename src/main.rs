//! Atelier: a server-rendered portfolio and how-to guide site.
//!
//! This is the application entry point. It initializes tracing, loads
//! configuration from a TOML file, constructs the content service client,
//! sets up the Axum router with all routes, and starts the HTTP server.

use std::net::SocketAddr;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use atelier::config::{AppConfig, DEFAULT_CONFIG_PATH, DEFAULT_LOG_FILTER};
use atelier::content::ContentService;
use atelier::http::shutdown::shutdown_signal;
use atelier::routes::create_router;
use atelier::state::AppState;
use atelier::templates::init_templates;

/// Atelier: portfolio and how-to guide site server
#[derive(Parser, Debug)]
#[command(name = "atelier", version, about)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// Log level filter (e.g., "atelier=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration
    let config = AppConfig::load(&args.config)?;

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    let registry =
        tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::new(&log_filter));
    if config.logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Loaded configuration");
    tracing::info!(
        base_url = %config.content.base_url,
        timeout_s = config.content.request_timeout_seconds,
        cache_ttl_s = config.content.cache_ttl_seconds,
        "Content service configured"
    );

    // Initialize Tera templates
    let tera = init_templates()?;
    tracing::info!("Initialized templates");

    // Initialize the content API client with its response cache
    let content = ContentService::new(&config.content)?;

    // Create application state and router
    let state = AppState::new(config.clone(), tera, content);
    let app = create_router(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.http.host, config.http.port).parse()?;
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
