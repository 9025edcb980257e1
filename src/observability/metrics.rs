//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): requests by method, route, status
//! - `gateway_request_duration_seconds` (histogram): latency by route
//! - `gateway_backend_timeouts_total` (counter): budget expiries by route
//! - `gateway_backend_up` (gauge): 1 = last probe succeeded, 0 = failed or
//!   never connected
//!
//! Timeouts are counted separately from other backend failures even though
//! both surface as HTTP 500: the distinction matters for operators, not for
//! the HTTP contract.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus exporter on the given address.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter started"),
        Err(e) => tracing::error!(error = %e, "Failed to start metrics exporter"),
    }
}

/// Record one completed HTTP request.
pub fn record_request(method: &str, route: &str, status: u16, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("route", route.to_string()),
        ("status", status.to_string()),
    ];
    counter!("gateway_requests_total", &labels).increment(1);
    histogram!("gateway_request_duration_seconds", "route" => route.to_string())
        .record(start.elapsed().as_secs_f64());
}

/// Record a backend call that exceeded its budget.
pub fn record_backend_timeout(route: &'static str) {
    counter!("gateway_backend_timeouts_total", "route" => route).increment(1);
}

/// Record the outcome of a backend health probe.
pub fn record_backend_up(up: bool) {
    gauge!("gateway_backend_up").set(if up { 1.0 } else { 0.0 });
}
