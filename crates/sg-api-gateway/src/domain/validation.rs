//! Field validation for request bodies.
//!
//! Checks accumulate; the first failure recorded for a field wins.

use crate::domain::error::ApiError;
use sg_relationship_graph::is_email_shaped;

#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<(&'static str, String)>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` against `field` unless `ok` holds.
    pub fn check(&mut self, ok: bool, field: &'static str, message: impl Into<String>) {
        if !ok && !self.errors.iter().any(|(f, _)| *f == field) {
            self.errors.push((field, message.into()));
        }
    }

    pub fn check_email(&mut self, field: &'static str, email: &str) {
        self.check(
            !email.trim().is_empty(),
            field,
            format!("{field} email cannot be empty"),
        );
        self.check(
            is_email_shaped(email),
            field,
            "must be a valid email address",
        );
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[(&'static str, String)] {
        &self.errors
    }

    /// `Validation failed` with every field error joined into the details.
    pub fn finish(self) -> Result<(), ApiError> {
        if self.is_valid() {
            return Ok(());
        }
        let details = self
            .errors
            .iter()
            .map(|(field, message)| format!("{field}: {message}"))
            .collect::<Vec<_>>()
            .join("; ");
        Err(ApiError::validation_failed(details))
    }
}
