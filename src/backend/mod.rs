//! Backend connection lifecycle and timeout budgets.
//!
//! # Responsibilities
//! - Establish the single long-lived channel to the backend service
//! - Probe connectivity before declaring the connection usable
//! - Wrap every RPC in its route's timeout budget
//! - Surface transport, status, and timeout failures as typed errors

pub mod connection;
pub mod timeout;

pub use connection::{BackendError, BackendHandle};
pub use timeout::{Route, TimeoutPolicy};
