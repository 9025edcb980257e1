//! Live backend health reporting.
//!
//! Every report is a fresh point-in-time probe; nothing is cached and no
//! background refresh loop exists. A present handle is probed with a bounded
//! `Ping`, a never-connected backend is reported as disconnected.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::backend::{BackendHandle, Route, TimeoutPolicy};
use crate::observability::metrics;

/// Health of a single dependency.
#[derive(Debug, Serialize)]
pub struct ServiceHealth {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Point-in-time readiness snapshot returned by `GET /health`.
///
/// The top-level status always reads `healthy` because the snapshot existing
/// at all proves the gateway is up; dependency state lives in `services`.
#[derive(Debug, Serialize)]
pub struct HealthSnapshot {
    pub status: &'static str,
    pub services: BTreeMap<String, ServiceHealth>,
    pub timestamp: DateTime<Utc>,
}

/// Probe the backend and synthesize a fresh snapshot.
pub async fn report(backend: Option<&BackendHandle>, timeouts: &TimeoutPolicy) -> HealthSnapshot {
    let backend_health = match backend {
        None => ServiceHealth {
            status: "disconnected",
            error: None,
        },
        Some(handle) => {
            match handle.ping("health check", Route::Health, timeouts).await {
                Ok(_) => ServiceHealth {
                    status: "healthy",
                    error: None,
                },
                Err(e) => {
                    tracing::warn!(error = %e, "Backend health probe failed");
                    ServiceHealth {
                        status: "unhealthy",
                        error: Some(e.to_string()),
                    }
                }
            }
        }
    };

    metrics::record_backend_up(backend_health.status == "healthy");

    let mut services = BTreeMap::new();
    services.insert("backend".to_string(), backend_health);

    HealthSnapshot {
        status: "healthy",
        services,
        timestamp: Utc::now(),
    }
}
