//! API Gateway service: owns the config and the graph, binds and serves HTTP.

use crate::domain::config::GatewayConfig;
use crate::domain::error::GatewayError;
use crate::router::build_router;
use axum::Router;
use sg_relationship_graph::SocialGraphApi;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

/// API Gateway service state
pub struct ApiGatewayService {
    config: GatewayConfig,
    graph: Arc<dyn SocialGraphApi>,
}

impl ApiGatewayService {
    /// Create a new API Gateway service
    pub fn new(config: GatewayConfig, graph: Arc<dyn SocialGraphApi>) -> Result<Self, GatewayError> {
        config
            .validate()
            .map_err(|e| GatewayError::Config(e.to_string()))?;

        if config.enable_metrics {
            sg_telemetry::register_metrics().map_err(|e| GatewayError::Config(e.to_string()))?;
        }

        Ok(Self { config, graph })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Router with all routes and middleware applied
    pub fn router(&self) -> Router {
        build_router(Arc::clone(&self.graph), &self.config)
    }

    /// Bind the configured HTTP address.
    pub async fn bind(&self) -> Result<TcpListener, GatewayError> {
        let addr = self.config.http_addr();
        TcpListener::bind(addr)
            .await
            .map_err(|e| GatewayError::Bind(format!("{addr}: {e}")))
    }

    /// Serve on `listener` until `shutdown` resolves.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<(), GatewayError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr: Option<SocketAddr> = listener.local_addr().ok();
        let router = self.router();

        info!(addr = ?addr, "Starting HTTP server");
        let result = axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await;

        match result {
            Ok(()) => {
                info!("API Gateway stopped");
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "HTTP server error");
                Err(GatewayError::Serve(e.to_string()))
            }
        }
    }
}
