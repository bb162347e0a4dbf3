//! Edge Gateway
//!
//! A small edge server built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────┐
//!                      │                 EDGE GATEWAY                  │
//!                      │                                               │
//!   Client Request     │  ┌─────────┐    ┌──────────────┐             │
//!   ──────────────────▶│  │  http   │───▶│   routing    │             │
//!                      │  │ server  │    │   dispatch   │             │
//!                      │  └─────────┘    └──────┬───────┘             │
//!                      │                        │                     │
//!                      │     ┌──────────────────┼─────────────────┐   │
//!                      │     ▼                  ▼                 ▼   │
//!                      │  ┌───────┐      ┌────────────┐    ┌────────┐ │
//!                      │  │ proxy │      │  contact   │    │ static │ │
//!                      │  │(auto- │      │  (verify + │    │ assets │ │
//!                      │  │config)│      │   mail)    │    │        │ │
//!                      │  └───┬───┘      └─────┬──────┘    └────────┘ │
//!                      └──────┼────────────────┼──────────────────────┘
//!                             ▼                ▼
//!                      mail upstream     siteverify + SMTP
//! ```

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use edge_gateway::config::{self, GatewayConfig};
use edge_gateway::http::HttpServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "edge_gateway=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("edge-gateway v0.1.0 starting");

    let config = load_config();

    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.host,
        asset_root = %config.static_assets.root.display(),
        "Configuration loaded"
    );

    if config.turnstile.secret.is_empty() {
        tracing::warn!("TURNSTILE_SECRET is not set; contact form verification will fail");
    }

    // Bind TCP listener
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    // Create and run HTTP server
    let server = HttpServer::new(config)?;
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Load configuration from the file named by `GATEWAY_CONFIG` (default
/// `gateway.toml`), falling back to built-in defaults when no file exists.
/// Secrets are overlaid from the environment either way.
fn load_config() -> GatewayConfig {
    let path = std::env::var("GATEWAY_CONFIG").unwrap_or_else(|_| "gateway.toml".into());
    let path = std::path::Path::new(&path);

    let mut config = if path.exists() {
        match config::load_config(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "Failed to load config, using defaults");
                GatewayConfig::default()
            }
        }
    } else {
        tracing::info!(path = %path.display(), "No config file found, using defaults");
        GatewayConfig::default()
    };

    config::apply_env_overrides(&mut config);
    config
}
