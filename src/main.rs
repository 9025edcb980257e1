//! AI Gateway
//!
//! A stateless protocol-translation gateway built with Tokio and Axum: it
//! exposes a REST-style API and forwards each request, after validation and
//! timeout budgeting, to the backend AI gRPC service.
//!
//! ```text
//!   Client ──HTTP──▶ router ──▶ handler ──▶ timeout budget ──▶ gRPC backend
//!                      │            │
//!                      │            └─ validation / error mapping
//!                      └─ trace + request-id + CORS + metrics layers
//! ```
//!
//! Startup connectivity failure is non-fatal: the gateway keeps serving
//! `/ping` and `/health` with the backend reported as disconnected.

use tokio::net::TcpListener;

use ai_gateway::backend::{BackendHandle, TimeoutPolicy};
use ai_gateway::config::GatewayConfig;
use ai_gateway::http::{AppState, HttpServer};
use ai_gateway::observability::{logging, metrics};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    tracing::info!("ai-gateway v0.1.0 starting");

    let config = GatewayConfig::from_env();
    tracing::info!(
        port = config.port,
        backend_addr = %config.backend_addr,
        "Configuration loaded"
    );

    if let Some(metrics_addr) = &config.metrics_addr {
        match metrics_addr.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %metrics_addr,
                "Failed to parse metrics address"
            ),
        }
    }

    let timeouts = TimeoutPolicy::default();

    // Availability over consistency: a down backend must not stop the
    // gateway from serving /ping and /health.
    let backend = match BackendHandle::connect(&config.backend_addr, &timeouts).await {
        Ok(handle) => {
            tracing::info!(addr = %config.backend_addr, "Connected to backend service");
            Some(handle)
        }
        Err(e) => {
            tracing::warn!(
                addr = %config.backend_addr,
                error = %e,
                "Could not connect to backend service"
            );
            None
        }
    };

    let listener = TcpListener::bind(config.bind_address()).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let server = HttpServer::new(AppState::new(backend, timeouts));
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
