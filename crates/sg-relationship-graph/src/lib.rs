//! # Relationship Graph Engine
//!
//! Friendships, subscriptions and blocks between users, plus the audience
//! resolution that reads all three.
//!
//! ## Relations
//!
//! | Relation | Shape | Uniqueness |
//! |----------|-------|------------|
//! | Friendship | unordered pair, stored lower ID first | one row per pair |
//! | Subscription | subscriber → target | one row per ordered pair |
//! | Block | blocker → blocked | one row per ordered pair |
//!
//! ## Invariants
//!
//! | Invariant | Description |
//! |-----------|-------------|
//! | Canonical ordering | `FriendPair` sorts its IDs, so (a,b) and (b,a) collide |
//! | Insert first | uniqueness is enforced by the store, never probed beforehand |
//! | Atomic block | friendship and subscriptions are severed in the same transaction that records the block |
//! | Mutual invisibility | a block in either direction forbids new friendships and subscriptions |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Entities, error kinds, mention extraction
//! - `ports/` - Port traits (inbound API, outbound SPI)
//! - `service/` - Application service, block guard, recipient resolver
//! - `adapters/` - In-memory and SQLite stores
//! - `config` - Store configuration
//!
//! ## Usage
//!
//! ```ignore
//! use sg_relationship_graph::{InMemoryRelationshipStore, SocialGraphApi, SocialGraphService};
//! use std::sync::Arc;
//!
//! let service = SocialGraphService::new(Arc::new(InMemoryRelationshipStore::new()));
//! service.register_user("andy@example.com").await?;
//! service.register_user("john@example.com").await?;
//! service.create_friendship("andy@example.com", "john@example.com").await?;
//! ```

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// Re-export key types for convenience
pub use adapters::{open_store, InMemoryRelationshipStore};
#[cfg(feature = "sqlite")]
pub use adapters::{SqliteRelationshipStore, SqliteStoreBuilder};
pub use config::{ConfigError, StoreBackend, StoreConfig};
pub use domain::entities::{Block, FriendPair, Subscription, User, UserId};
pub use domain::errors::{ErrorKind, GraphError};
pub use domain::mentions::{extract_mentions, is_email_shaped};
pub use ports::inbound::SocialGraphApi;
pub use ports::outbound::{RelationshipStore, RelationshipTransaction};
pub use service::{BlockGuard, RecipientResolver, SocialGraphService};
