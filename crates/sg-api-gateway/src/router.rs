//! HTTP routing.

use crate::domain::config::GatewayConfig;
use crate::handlers;
use crate::middleware::create_cors_layer;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use sg_relationship_graph::SocialGraphApi;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub graph: Arc<dyn SocialGraphApi>,
}

/// Build the `/api/v1` router with its middleware stack.
pub fn build_router(graph: Arc<dyn SocialGraphApi>, config: &GatewayConfig) -> Router {
    let mut api = Router::new()
        .route("/users", post(handlers::register_user))
        .route("/friends", post(handlers::create_friendship))
        .route("/friends/list", post(handlers::friend_list))
        .route("/friends/common", post(handlers::common_friends))
        .route("/subscriptions", post(handlers::create_subscription))
        .route("/blocks", post(handlers::create_block))
        .route("/recipients", post(handlers::resolve_recipients))
        .route("/health", get(handlers::health_check));

    if config.enable_metrics {
        api = api.route("/metrics", get(handlers::metrics));
    }

    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(create_cors_layer(&config.cors))
        .layer(TimeoutLayer::new(config.request_timeout()))
        .layer(DefaultBodyLimit::max(config.max_body_bytes));

    Router::new()
        .nest("/api/v1", api)
        .layer(middleware)
        .with_state(AppState { graph })
}
