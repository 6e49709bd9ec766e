//! Node configuration, assembled from each crate's environment loader.

use sg_api_gateway::GatewayConfig;
use sg_relationship_graph::StoreConfig;
use sg_telemetry::TelemetryConfig;
use thiserror::Error;

/// Everything the node needs to start.
#[derive(Debug, Clone, Default)]
pub struct NodeConfig {
    /// Logging and metrics.
    pub telemetry: TelemetryConfig,
    /// Relationship store backend.
    pub store: StoreConfig,
    /// HTTP gateway.
    pub gateway: GatewayConfig,
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum NodeConfigError {
    #[error("store: {0}")]
    Store(#[from] sg_relationship_graph::ConfigError),

    #[error("gateway: {0}")]
    Gateway(#[from] sg_api_gateway::ConfigError),
}

impl NodeConfig {
    /// Load from `SG_*` environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, NodeConfigError> {
        let config = Self {
            telemetry: TelemetryConfig::from_env(),
            store: StoreConfig::from_env()?,
            gateway: GatewayConfig::from_env(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), NodeConfigError> {
        self.store.validate()?;
        self.gateway.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(NodeConfig::default().validate().is_ok());
    }

    #[test]
    fn test_gateway_error_surfaces() {
        let mut config = NodeConfig::default();
        config.gateway.max_body_bytes = 0;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, NodeConfigError::Gateway(_)));
        assert!(err.to_string().starts_with("gateway:"));
    }

    #[test]
    fn test_store_error_surfaces() {
        let mut config = NodeConfig::default();
        config.store.max_connections = 0;
        assert!(matches!(
            config.validate(),
            Err(NodeConfigError::Store(_))
        ));
    }
}
