//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, timeout, body limit, CORS)
//! - Bind server to listener
//! - Serve until the shutdown signal fires

use axum::{
    body::Body,
    error_handling::HandleErrorLayer,
    extract::DefaultBodyLimit,
    http::Request,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::backend::{BackendBody, BackendClient, BackendResult};
use crate::config::RelayConfig;
use crate::http::handlers;
use crate::http::request::{propagate_request_id_layer, request_id, set_request_id_layer};
use crate::relay::RelayService;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<RelayService>,
    pub probe_path: Arc<str>,
    pub probe_body: Arc<BackendBody>,
}

/// HTTP server for the relay.
pub struct HttpServer {
    router: Router,
    config: RelayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// Fails only if the backend client cannot be built.
    pub fn new(config: RelayConfig) -> BackendResult<Self> {
        let client = BackendClient::new(&config.backend, &config.timeouts)?;

        let mut probe_body = BackendBody::new();
        if let Some(date) = config.backend.probe_query_date.as_deref() {
            probe_body.insert("queryDate", date);
        }

        let state = AppState {
            relay: Arc::new(RelayService::new(client)),
            probe_path: Arc::from(config.backend.probe_path.as_str()),
            probe_body: Arc::new(probe_body),
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Oversized bodies and expired deadlines both come back as envelopes.
    fn build_router(config: &RelayConfig, state: AppState) -> Router {
        Router::new()
            .route("/api/proxy", post(handlers::proxy))
            .route("/api/health", get(handlers::health))
            .route("/api/test-backend", post(handlers::test_backend))
            .with_state(state)
            .layer(DefaultBodyLimit::max(config.listener.max_body_size))
            .layer(
                ServiceBuilder::new()
                    .layer(HandleErrorLayer::new(handlers::handle_middleware_error))
                    .timeout(Duration::from_secs(config.timeouts.request_secs)),
            )
            .layer(CorsLayer::permissive())
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id(request.headers()),
                )
            }))
            .layer(set_request_id_layer())
    }

    /// The fully layered router, e.g. for driving it without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            backend = %self.config.backend.base_url,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Draining in-flight requests");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
