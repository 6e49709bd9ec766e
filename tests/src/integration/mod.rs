//! Cross-crate integration tests.

pub mod flows;
pub mod http_e2e;
pub mod persistence;
