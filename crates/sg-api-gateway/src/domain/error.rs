//! API Gateway error types.
//!
//! Every failure leaves the gateway as
//! `{ "success": false, "error": { "type", "message", "details"? } }`
//! with the HTTP status derived from the error kind.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use sg_relationship_graph::{ErrorKind, GraphError};
use std::fmt;

/// Error returned to API clients
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// Failure category, drives the status code
    pub kind: ErrorKind,
    /// Human-readable message
    pub message: String,
    /// Optional extra context (field errors, parser output)
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Body could not be parsed as the expected JSON document
    pub fn invalid_format(details: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, "Invalid request format").with_details(details)
    }

    /// One or more fields failed validation
    pub fn validation_failed(details: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, "Validation failed").with_details(details)
    }

    pub fn internal(details: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, "Internal server error").with_details(details)
    }

    /// HTTP status for this error's kind
    pub fn status(&self) -> StatusCode {
        status_for(self.kind)
    }
}

/// Status mapping applied at the boundary.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation | ErrorKind::Business => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Forbidden => StatusCode::FORBIDDEN,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::Database => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.details {
            Some(details) => write!(f, "{}: {} ({})", self.kind, self.message, details),
            None => write!(f, "{}: {}", self.kind, self.message),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<GraphError> for ApiError {
    fn from(err: GraphError) -> Self {
        Self::new(err.kind(), err.message())
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    success: bool,
    error: ErrorDetails<'a>,
}

#[derive(Serialize)]
struct ErrorDetails<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a str>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            success: false,
            error: ErrorDetails {
                kind: self.kind.code(),
                message: &self.message,
                details: self.details.as_deref(),
            },
        };
        (self.status(), Json(body)).into_response()
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Gateway-level errors (not sent to clients)
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Server socket bind error
    #[error("server bind error: {0}")]
    Bind(String),

    /// Server stopped with an I/O error
    #[error("server error: {0}")]
    Serve(String),
}
