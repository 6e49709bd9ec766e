//! `sg-node`: serve the social graph over HTTP.
//!
//! Configuration comes from the environment; see `NodeConfig::from_env`.

use anyhow::Result;
use sg_node::{NodeConfig, SocialGraphNode};
use sg_telemetry::init_telemetry;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let config = NodeConfig::from_env()?;

    let _telemetry = init_telemetry(&config.telemetry)?;
    info!(
        service = %config.telemetry.service_name,
        backend = %config.store.backend,
        "configuration loaded"
    );

    let node = SocialGraphNode::new(config).await?;
    node.run(shutdown_signal()).await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("received Ctrl+C, shutting down"),
        Err(e) => warn!(error = %e, "failed to listen for Ctrl+C, shutting down"),
    }
}
