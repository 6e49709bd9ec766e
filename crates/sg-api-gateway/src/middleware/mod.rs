//! Middleware for the API Gateway.
//!
//! Layer order (see `router::build_router`):
//! Request → Trace → CORS → Timeout → BodyLimit → Handler

pub mod cors;
pub mod json;

pub use cors::create_cors_layer;
pub use json::ApiJson;
