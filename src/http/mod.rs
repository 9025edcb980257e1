//! HTTP surface: router, handlers, and error mapping.

pub mod error;
pub mod handlers;
pub mod server;

pub use error::{ApiError, ApiJson};
pub use server::{build_router, AppState, HttpServer};
