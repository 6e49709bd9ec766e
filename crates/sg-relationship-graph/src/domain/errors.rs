//! Error types for the relationship engine
//!
//! Every failure is classified exactly once where it originates (service
//! precondition or store adapter) and travels up unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Failure category consumed by the boundary layer for status mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Malformed input caught before any store access.
    Validation,
    /// Domain rule violation (self-friend, self common-friends).
    Business,
    /// A referenced user does not exist.
    NotFound,
    /// Mutation attempted across a block.
    Forbidden,
    /// The relation already exists.
    Conflict,
    /// Storage failure, including unclassified constraint violations.
    Database,
}

impl ErrorKind {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "VALIDATION_ERROR",
            ErrorKind::Business => "BUSINESS_ERROR",
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::Forbidden => "FORBIDDEN",
            ErrorKind::Conflict => "CONFLICT",
            ErrorKind::Database => "DATABASE_ERROR",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// All errors produced by the relationship engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Business(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Database(String),
}

impl GraphError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GraphError::Validation(_) => ErrorKind::Validation,
            GraphError::Business(_) => ErrorKind::Business,
            GraphError::NotFound(_) => ErrorKind::NotFound,
            GraphError::Forbidden(_) => ErrorKind::Forbidden,
            GraphError::Conflict(_) => ErrorKind::Conflict,
            GraphError::Database(_) => ErrorKind::Database,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            GraphError::Validation(m)
            | GraphError::Business(m)
            | GraphError::NotFound(m)
            | GraphError::Forbidden(m)
            | GraphError::Conflict(m)
            | GraphError::Database(m) => m,
        }
    }

    pub fn cannot_friend_self() -> Self {
        GraphError::Business("Cannot add yourself as a friend".into())
    }

    pub fn cannot_common_friends_with_self() -> Self {
        GraphError::Business("Cannot get common friends with yourself".into())
    }

    pub fn user_not_found(email: &str) -> Self {
        GraphError::NotFound(format!("User not found: {email}"))
    }

    pub fn user_blocked() -> Self {
        GraphError::Forbidden("Cannot perform action on blocked user".into())
    }

    pub fn already_friends() -> Self {
        GraphError::Conflict("Users are already friends".into())
    }

    pub fn already_subscribed() -> Self {
        GraphError::Conflict("Already subscribed to user".into())
    }

    pub fn already_blocked() -> Self {
        GraphError::Conflict("User is already blocked".into())
    }

    pub fn email_taken(email: &str) -> Self {
        GraphError::Conflict(format!("Email address already exists: {email}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_is_message() {
        let err = GraphError::user_not_found("a@example.com");
        assert_eq!(err.to_string(), "User not found: a@example.com");
        assert_eq!(err.message(), "User not found: a@example.com");
    }

    #[test]
    fn test_kind_mapping() {
        assert_eq!(GraphError::cannot_friend_self().kind(), ErrorKind::Business);
        assert_eq!(GraphError::user_blocked().kind(), ErrorKind::Forbidden);
        assert_eq!(GraphError::already_friends().kind(), ErrorKind::Conflict);
        assert_eq!(
            GraphError::Database("disk".into()).kind(),
            ErrorKind::Database
        );
    }

    #[test]
    fn test_kind_codes() {
        assert_eq!(ErrorKind::Validation.code(), "VALIDATION_ERROR");
        assert_eq!(ErrorKind::NotFound.to_string(), "NOT_FOUND");
        assert_eq!(
            serde_json::to_string(&ErrorKind::Database).unwrap(),
            "\"DATABASE\""
        );
    }
}
