//! Domain types for the API Gateway.
//!
//! Configuration, client-facing errors, request/response bodies and their
//! field validation.

pub mod config;
pub mod error;
pub mod types;
pub mod validation;

// Re-exports for convenience
pub use config::{ConfigError, CorsConfig, GatewayConfig};
pub use error::{status_for, ApiError, ApiResult, GatewayError};
pub use types::*;
pub use validation::Validator;
