//! Inbound Ports (Driving Ports / API)
//!
//! Operations exposed to the boundary layer. Inputs are already parsed;
//! every result is either the value or a classified `GraphError`.

use crate::domain::entities::User;
use crate::domain::errors::GraphError;
use async_trait::async_trait;

/// Primary Social Graph API
#[async_trait]
pub trait SocialGraphApi: Send + Sync {
    /// Register a user identity.
    async fn register_user(&self, email: &str) -> Result<User, GraphError>;

    /// Befriend two users.
    ///
    /// 1. Rejects `email1 == email2` before touching the store
    /// 2. Resolves both users
    /// 3. Refuses if either blocks the other
    /// 4. Inserts the canonical pair
    async fn create_friendship(&self, email1: &str, email2: &str) -> Result<(), GraphError>;

    /// Friends of one user, sorted by email.
    async fn friend_list(&self, email: &str) -> Result<Vec<User>, GraphError>;

    /// Users befriended by both, sorted by email.
    async fn common_friends(&self, email1: &str, email2: &str) -> Result<Vec<User>, GraphError>;

    /// Subscribe `requestor` to updates from `target`.
    async fn create_subscription(&self, requestor: &str, target: &str) -> Result<(), GraphError>;

    /// Block `target` on behalf of `requestor`, severing friendship and
    /// subscriptions between them in one atomic unit.
    async fn create_block(&self, requestor: &str, target: &str) -> Result<(), GraphError>;

    /// Audience for a message: friends, subscribers and unblocked mentions.
    async fn resolve_recipients(&self, sender: &str, text: &str)
        -> Result<Vec<User>, GraphError>;
}
