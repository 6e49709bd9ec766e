//! Domain module for the relationship engine
//!
//! Contains core entities, errors and mention extraction.

pub mod entities;
pub mod errors;
pub mod mentions;

pub use entities::*;
pub use errors::*;
pub use mentions::{distinct_mentions, extract_mentions, is_email_shaped};
