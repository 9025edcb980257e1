//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with all handlers
//! - Wire up middleware (tracing, request ID, CORS, metrics)
//! - Inject the backend handle and timeout policy into handlers
//! - Serve with graceful shutdown

use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::MakeRequestUuid,
    trace::TraceLayer,
    ServiceBuilderExt,
};

use crate::backend::{BackendHandle, TimeoutPolicy};
use crate::http::error::ApiError;
use crate::http::handlers;
use crate::observability::metrics;

/// Application state injected into handlers.
///
/// The handle is set exactly once, before the listener starts accepting, and
/// never mutated afterwards; `None` means the backend was never reachable.
#[derive(Clone)]
pub struct AppState {
    backend: Option<BackendHandle>,
    timeouts: TimeoutPolicy,
}

impl AppState {
    pub fn new(backend: Option<BackendHandle>, timeouts: TimeoutPolicy) -> Self {
        Self { backend, timeouts }
    }

    /// The connected backend, or `Unavailable` when it never came up.
    /// Every backend-dependent handler goes through this check.
    pub fn backend(&self) -> Result<&BackendHandle, ApiError> {
        self.backend.as_ref().ok_or(ApiError::Unavailable)
    }

    pub fn backend_opt(&self) -> Option<&BackendHandle> {
        self.backend.as_ref()
    }

    pub fn timeouts(&self) -> &TimeoutPolicy {
        &self.timeouts
    }
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server over the given state.
    pub fn new(state: AppState) -> Self {
        Self {
            router: build_router(state),
        }
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Build the Axum router with all middleware layers. Public so integration
/// tests can drive it without binding a socket.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/ping", get(handlers::ping))
        .route("/completion", post(handlers::completion))
        .route("/optimize", post(handlers::optimize))
        .route("/job/{id}", get(handlers::job_status));

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api/v1", api)
        .route_layer(middleware::from_fn(track_metrics))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .set_x_request_id(MakeRequestUuid)
                .layer(TraceLayer::new_for_http())
                .propagate_x_request_id(),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

/// Record request count and latency, labeled by the matched route pattern.
async fn track_metrics(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| request.uri().path().to_owned());
    let method = request.method().clone();

    let response = next.run(request).await;

    metrics::record_request(method.as_str(), &route, response.status().as_u16(), start);
    response
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
