//! Gateway configuration with validation.

use serde::{Deserialize, Serialize};
use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

/// Main gateway configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Bind address
    pub host: IpAddr,
    /// Bind port
    pub port: u16,
    /// Per-request deadline, enforced by the timeout layer
    pub request_timeout_secs: u64,
    /// Largest accepted request body
    pub max_body_bytes: usize,
    /// Expose `GET /api/v1/metrics`
    pub enable_metrics: bool,
    /// CORS configuration
    pub cors: CorsConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8080,
            request_timeout_secs: 30,
            max_body_bytes: 64 * 1024,
            enable_metrics: true,
            cors: CorsConfig::default(),
        }
    }
}

impl GatewayConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `SG_HTTP_HOST`: Bind address (default: 0.0.0.0)
    /// - `SG_HTTP_PORT`: Bind port (default: 8080)
    /// - `SG_REQUEST_TIMEOUT_SECS`: Request deadline (default: 30)
    /// - `SG_MAX_BODY_BYTES`: Body size limit (default: 65536)
    /// - `SG_ENABLE_METRICS`: Serve Prometheus metrics (default: true)
    /// - `SG_CORS_ORIGINS`: Comma-separated allowed origins (default: *)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            host: env::var("SG_HTTP_HOST")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.host),
            port: env::var("SG_HTTP_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            request_timeout_secs: env::var("SG_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout_secs),
            max_body_bytes: env::var("SG_MAX_BODY_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_body_bytes),
            enable_metrics: env::var("SG_ENABLE_METRICS")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(defaults.enable_metrics),
            cors: env::var("SG_CORS_ORIGINS")
                .map(|v| CorsConfig {
                    enabled: true,
                    allowed_origins: v
                        .split(',')
                        .map(|o| o.trim().to_string())
                        .filter(|o| !o.is_empty())
                        .collect(),
                })
                .unwrap_or(defaults.cors),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(
                "request timeout cannot be 0".into(),
            ));
        }

        if self.max_body_bytes == 0 {
            return Err(ConfigError::InvalidLimit("max_body_bytes cannot be 0".into()));
        }

        if self.cors.enabled && self.cors.allowed_origins.is_empty() {
            return Err(ConfigError::Invalid(
                "CORS enabled without allowed origins".into(),
            ));
        }

        Ok(())
    }

    /// Get HTTP server bind address
    pub fn http_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Enable CORS
    pub enabled: bool,
    /// Allowed origins (`*` for any)
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            allowed_origins: vec!["*".to_string()],
        }
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Invalid size limit
    #[error("invalid limit: {0}")]
    InvalidLimit(String),
    /// Invalid timeout value
    #[error("invalid timeout: {0}")]
    InvalidTimeout(String),
    /// General configuration error
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
