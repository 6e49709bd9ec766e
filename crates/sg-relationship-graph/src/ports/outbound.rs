//! Outbound Ports (Driven Ports / SPI)
//!
//! The Relationship Store contract. Adapters own all persisted state and
//! enforce uniqueness themselves; callers never probe before inserting.

use crate::domain::entities::{Block, FriendPair, Subscription, User, UserId};
use crate::domain::errors::GraphError;
use async_trait::async_trait;

/// Persistent record of users and their relations.
///
/// ## Failure classification
///
/// - duplicate relation or email → `GraphError::Conflict`
/// - unknown email on single lookup → `GraphError::NotFound`
/// - unresolved user ID on a relation write → `GraphError::Database`
#[async_trait]
pub trait RelationshipStore: Send + Sync {
    /// Register a new user. Used for seeding; identities are otherwise
    /// created outside this system.
    async fn insert_user(&self, email: &str) -> Result<User, GraphError>;

    async fn find_user_by_email(&self, email: &str) -> Result<User, GraphError>;

    /// Resolve many emails at once. Misses are silently omitted.
    async fn find_users_by_emails(&self, emails: &[String]) -> Result<Vec<User>, GraphError>;

    /// Insert a canonical friendship. Concurrent identical inserts resolve to
    /// exactly one success and one `Conflict`.
    async fn insert_friendship(&self, pair: FriendPair) -> Result<(), GraphError>;

    /// Returns the number of rows removed.
    async fn delete_friendship(&self, pair: FriendPair) -> Result<u64, GraphError>;

    async fn insert_subscription(&self, subscription: Subscription) -> Result<(), GraphError>;

    async fn delete_subscription(&self, subscription: Subscription) -> Result<u64, GraphError>;

    async fn insert_block(&self, block: Block) -> Result<(), GraphError>;

    async fn block_exists(&self, block: Block) -> Result<bool, GraphError>;

    /// Every block between `user` and any of `others`, in either direction,
    /// fetched with a single query.
    async fn blocks_involving(
        &self,
        user: UserId,
        others: &[UserId],
    ) -> Result<Vec<Block>, GraphError>;

    /// Friends of `id`, deduplicated, excluding `id`, sorted by email.
    async fn friends_of(&self, id: UserId) -> Result<Vec<User>, GraphError>;

    /// Users subscribed to `id`, sorted by email.
    async fn subscribers_of(&self, id: UserId) -> Result<Vec<User>, GraphError>;

    /// Open an atomic unit of work.
    async fn begin(&self) -> Result<Box<dyn RelationshipTransaction>, GraphError>;
}

/// A group of mutations applied entirely or not at all.
///
/// Dropping a transaction without calling `commit` discards its changes.
#[async_trait]
pub trait RelationshipTransaction: Send {
    async fn delete_friendship(&mut self, pair: FriendPair) -> Result<u64, GraphError>;

    async fn delete_subscription(&mut self, subscription: Subscription)
        -> Result<u64, GraphError>;

    async fn insert_block(&mut self, block: Block) -> Result<(), GraphError>;

    /// Make every change visible at once. A transaction commits at most once.
    async fn commit(&mut self) -> Result<(), GraphError>;

    async fn rollback(&mut self) -> Result<(), GraphError>;
}
