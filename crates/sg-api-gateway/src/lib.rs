//! Social graph API Gateway - JSON/HTTP boundary over the relationship graph.
//!
//! # Routes
//!
//! All routes live under `/api/v1` and take JSON bodies:
//!
//! | Method | Path               | Body                          | Success |
//! |--------|--------------------|-------------------------------|---------|
//! | POST   | `/users`           | `{email}`                     | 201     |
//! | POST   | `/friends`         | `{friends: [a, b]}`           | 201     |
//! | POST   | `/friends/list`    | `{email}`                     | 200     |
//! | POST   | `/friends/common`  | `{friends: [a, b]}`           | 200     |
//! | POST   | `/subscriptions`   | `{requestor, target}`         | 201     |
//! | POST   | `/blocks`          | `{requestor, target}`         | 201     |
//! | POST   | `/recipients`      | `{sender, text}`              | 200     |
//! | GET    | `/health`          |                               | 200     |
//! | GET    | `/metrics`         |                               | 200     |
//!
//! Failures use a single envelope; the status follows the error kind:
//! validation and business errors are 400, not found 404, forbidden 403,
//! conflict 409 and database 500.
//!
//! # Usage
//!
//! ```ignore
//! use sg_api_gateway::{ApiGatewayService, GatewayConfig};
//!
//! let service = ApiGatewayService::new(GatewayConfig::from_env()?, graph)?;
//! let listener = service.bind().await?;
//! service.serve(listener, shutdown_signal()).await?;
//! ```

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod domain;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod service;

// Re-exports for public API
pub use domain::config::{ConfigError, CorsConfig, GatewayConfig};
pub use domain::error::{ApiError, ApiResult, GatewayError};
pub use domain::types::*;
pub use router::{build_router, AppState};
pub use service::ApiGatewayService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
