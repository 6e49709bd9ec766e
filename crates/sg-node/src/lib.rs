//! # Social Graph Node
//!
//! Wires the relationship graph to the HTTP gateway.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration from `SG_*` environment variables
//! 2. Initialize telemetry (metrics registry, then logging)
//! 3. Open the relationship store and apply migrations
//! 4. Bind the gateway and serve until the shutdown signal

pub mod config;

use std::future::Future;
use std::sync::Arc;

use anyhow::{Context, Result};
use sg_api_gateway::ApiGatewayService;
use sg_relationship_graph::{open_store, SocialGraphApi, SocialGraphService};
use tokio::net::TcpListener;
use tracing::info;

pub use config::{NodeConfig, NodeConfigError};

/// A fully wired node, ready to serve.
pub struct SocialGraphNode {
    gateway: ApiGatewayService,
}

impl SocialGraphNode {
    /// Open the store and build the gateway. Telemetry must already be
    /// initialized by the caller.
    pub async fn new(config: NodeConfig) -> Result<Self> {
        let store = open_store(&config.store)
            .await
            .context("failed to open relationship store")?;
        let graph: Arc<dyn SocialGraphApi> = Arc::new(SocialGraphService::new(store));

        let gateway = ApiGatewayService::new(config.gateway, graph)
            .context("failed to create API gateway")?;

        Ok(Self { gateway })
    }

    pub fn gateway(&self) -> &ApiGatewayService {
        &self.gateway
    }

    /// Bind the configured address and serve until `shutdown` resolves.
    pub async fn run<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = self
            .gateway
            .bind()
            .await
            .context("failed to bind API gateway")?;
        self.serve_on(listener, shutdown).await
    }

    /// Serve on an already bound listener.
    pub async fn serve_on<F>(self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        info!(addr = ?listener.local_addr().ok(), "social graph node starting");
        self.gateway
            .serve(listener, shutdown)
            .await
            .context("API gateway stopped with an error")?;
        info!("social graph node stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sg_relationship_graph::StoreConfig;

    #[tokio::test]
    async fn test_node_runs_and_stops() {
        let mut config = NodeConfig {
            store: StoreConfig::memory(),
            ..Default::default()
        };
        config.gateway.host = "127.0.0.1".parse().unwrap();
        config.gateway.port = 0;

        let node = SocialGraphNode::new(config).await.unwrap();
        node.run(async {}).await.unwrap();
    }

    #[tokio::test]
    async fn test_invalid_gateway_config_fails() {
        let mut config = NodeConfig {
            store: StoreConfig::memory(),
            ..Default::default()
        };
        config.gateway.request_timeout_secs = 0;
        assert!(SocialGraphNode::new(config).await.is_err());
    }
}
