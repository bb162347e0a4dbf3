//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the catch-all dispatch handler
//! - Wire up middleware (tracing, timeout, request ID)
//! - Bind server to listener
//! - Dispatch requests to the routing engine
//! - Hand matched requests to the proxy, contact, or asset endpoints

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::Response,
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tower::ServiceExt;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::GatewayConfig;
use crate::contact;
use crate::mail::{MailError, MailTransport, SmtpMailer};
use crate::proxy;
use crate::routing::{EdgeRouter, Endpoint};
use crate::verify::TurnstileVerifier;

/// Application state injected into handlers.
///
/// Carries every per-request collaborator explicitly; there is no
/// process-wide mutable state.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<EdgeRouter>,
    pub config: Arc<GatewayConfig>,
    pub client: reqwest::Client,
    pub verifier: Arc<TurnstileVerifier>,
    pub mailer: Arc<dyn MailTransport>,
    pub assets: ServeDir,
}

/// HTTP server for the edge gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a server with the production SMTP transport.
    pub fn new(config: GatewayConfig) -> Result<Self, MailError> {
        let mailer: Arc<dyn MailTransport> = Arc::new(SmtpMailer::from_config(&config.smtp)?);
        Ok(Self::with_transport(config, mailer))
    }

    /// Create a server with an explicit mail transport.
    pub fn with_transport(config: GatewayConfig, mailer: Arc<dyn MailTransport>) -> Self {
        let edge_router = Arc::new(EdgeRouter::from_config(&config.routes));
        let client = reqwest::Client::new();
        let verifier = Arc::new(TurnstileVerifier::new(
            client.clone(),
            config.turnstile.verify_url.clone(),
            config.turnstile.secret.clone(),
        ));
        let assets = ServeDir::new(&config.static_assets.root);

        let state = AppState {
            router: edge_router,
            config: Arc::new(config.clone()),
            client,
            verifier,
            mailer,
            assets,
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(gateway_handler))
            .route("/", any(gateway_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

/// Main dispatch handler. Every request passes through here exactly once.
async fn gateway_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let endpoint = state.router.dispatch(&request);

    tracing::debug!(
        method = %request.method(),
        path = %request.uri().path(),
        endpoint = ?endpoint,
        "Dispatching request"
    );

    match endpoint {
        Endpoint::AutoconfigProxy => proxy::forward(&state, request).await,
        Endpoint::ContactForm => contact::handle(&state, request).await,
        Endpoint::StaticAssets => serve_assets(&state, request).await,
    }
}

/// Resolve a request against the static asset root. ServeDir supplies
/// the index and not-found semantics.
async fn serve_assets(state: &AppState, request: Request<Body>) -> Response {
    match state.assets.clone().oneshot(request).await {
        Ok(response) => response.map(Body::new),
        Err(infallible) => match infallible {},
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
