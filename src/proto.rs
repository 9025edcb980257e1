//! Generated gRPC bindings for the backend AI service.
//!
//! The wire contract lives in `proto/aiservice.proto`; `build.rs` generates
//! both the client (used by the gateway) and the server (used by the test
//! mock backend).

tonic::include_proto!("aiservice");
