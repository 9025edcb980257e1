//! AI Gateway Library
//!
//! A stateless HTTP front for a backend AI gRPC service. The gateway owns
//! no business logic: it validates incoming JSON, enforces per-route timeout
//! budgets, forwards the call over a single shared channel, and maps backend
//! failures onto HTTP status codes.

pub mod backend;
pub mod config;
pub mod health;
pub mod http;
pub mod observability;
pub mod proto;

pub use backend::{BackendHandle, TimeoutPolicy};
pub use config::GatewayConfig;
pub use http::{AppState, HttpServer};
