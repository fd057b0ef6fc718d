//! Prospects-RS: administrative console for prospect entities and work orders
//!
//! This is the main entry point for the application.

use anyhow::Result;
use prospects_rs::{
    config,
    network::ApiClient,
    web::{create_router, AppState},
};
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    if std::env::args().skip(1).any(|arg| arg == "-h" || arg == "--help") {
        print_usage();
        return Ok(());
    }

    // Load configuration
    let settings = config::load()?;

    // Initialize logging
    let default_level = if settings.general.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();

    info!("Starting Prospects-RS v{}", prospects_rs::VERSION);
    info!("Loaded configuration for instance: {}", settings.general.instance_name);

    // Initialize HTTP client
    let client = ApiClient::with_settings(&settings.api)?;
    info!("API client initialized for {}", client.base_url());

    // Create application state
    let addr = SocketAddr::new(settings.server.bind_address.parse()?, settings.server.port);
    let state = AppState::new(settings, client)?;
    let app = create_router(state);

    info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Print usage information
fn print_usage() {
    println!(
        r#"
Prospects-RS v{}
Administrative console for prospect entities and work orders

USAGE:
    prospects-rs

ENVIRONMENT VARIABLES:
    PROSPECTS_SETTINGS_PATH  Path to settings.yml
    PROSPECTS_DEBUG          Enable debug logging (true/false)
    PROSPECTS_PORT           Server port
    PROSPECTS_BIND_ADDRESS   Bind address
    PROSPECTS_API_URL        Base URL of the REST API
    PROSPECTS_API_TOKEN      Token sent in the API token header
    RUST_LOG                 Log filter, overrides PROSPECTS_DEBUG
"#,
        prospects_rs::VERSION
    );
}
