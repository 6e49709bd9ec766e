//! Ports module for the relationship engine
//!
//! Defines inbound (API) and outbound (SPI) port traits.

pub mod inbound;
pub mod outbound;

pub use inbound::SocialGraphApi;
pub use outbound::{RelationshipStore, RelationshipTransaction};
