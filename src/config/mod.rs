//! Configuration loading from the environment.
//!
//! The gateway is configured entirely through environment variables with
//! defaults, mirroring its deployment as a thin sidecar in front of the
//! backend service. The lookup function is injectable so tests never mutate
//! process-wide state.

/// Runtime configuration for the gateway.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// HTTP listening port (`GATEWAY_PORT`).
    pub port: u16,

    /// Backend gRPC address (`BACKEND_GRPC_ADDR`). Always carries a scheme.
    pub backend_addr: String,

    /// Prometheus exporter bind address (`GATEWAY_METRICS_ADDR`).
    /// Unset disables the exporter.
    pub metrics_addr: Option<String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            backend_addr: "http://localhost:50051".to_string(),
            metrics_addr: None,
        }
    }
}

impl GatewayConfig {
    /// Load configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup. Unparsable values
    /// fall back to defaults rather than failing startup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let port = lookup("GATEWAY_PORT")
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.port);
        let backend_addr = lookup("BACKEND_GRPC_ADDR")
            .map(|v| normalize_backend_addr(&v))
            .unwrap_or(defaults.backend_addr);
        let metrics_addr = lookup("GATEWAY_METRICS_ADDR");

        Self {
            port,
            backend_addr,
            metrics_addr,
        }
    }

    /// Address the HTTP listener binds to.
    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

/// tonic endpoints require a scheme; operators usually supply `host:port`.
fn normalize_backend_addr(addr: &str) -> String {
    if addr.contains("://") {
        addr.to_string()
    } else {
        format!("http://{addr}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = GatewayConfig::from_lookup(|_| None);
        assert_eq!(config.port, 8080);
        assert_eq!(config.backend_addr, "http://localhost:50051");
        assert!(config.metrics_addr.is_none());
    }

    #[test]
    fn env_values_override_defaults() {
        let config = GatewayConfig::from_lookup(|key| match key {
            "GATEWAY_PORT" => Some("9090".to_string()),
            "BACKEND_GRPC_ADDR" => Some("http://backend:50051".to_string()),
            "GATEWAY_METRICS_ADDR" => Some("0.0.0.0:9000".to_string()),
            _ => None,
        });
        assert_eq!(config.port, 9090);
        assert_eq!(config.backend_addr, "http://backend:50051");
        assert_eq!(config.metrics_addr.as_deref(), Some("0.0.0.0:9000"));
    }

    #[test]
    fn scheme_less_backend_addr_is_normalized() {
        let config = GatewayConfig::from_lookup(|key| match key {
            "BACKEND_GRPC_ADDR" => Some("backend:50051".to_string()),
            _ => None,
        });
        assert_eq!(config.backend_addr, "http://backend:50051");
    }

    #[test]
    fn unparsable_port_falls_back_to_default() {
        let config = GatewayConfig::from_lookup(|key| match key {
            "GATEWAY_PORT" => Some("not-a-port".to_string()),
            _ => None,
        });
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn bind_address_uses_port() {
        let config = GatewayConfig::default();
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
    }
}
