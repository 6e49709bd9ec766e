//! # Social Graph Service - Helper Methods

use super::*;
use crate::domain::entities::{Block, FriendPair, Subscription, User};
use crate::domain::errors::GraphError;
use crate::ports::outbound::RelationshipTransaction;

impl<S> SocialGraphService<S>
where
    S: RelationshipStore + ?Sized,
{
    /// Resolve both sides of a pairwise operation, first miss wins.
    pub(crate) async fn resolve_pair(&self, a: &str, b: &str) -> Result<(User, User), GraphError> {
        let first = self.store.find_user_by_email(a).await?;
        let second = self.store.find_user_by_email(b).await?;
        Ok((first, second))
    }

    /// Refuse a mutation between two users when either blocks the other.
    pub(crate) async fn ensure_not_blocked(&self, a: &User, b: &User) -> Result<(), GraphError> {
        if self.guard.is_blocked_either_way(a.id, b.id).await? {
            return Err(GraphError::user_blocked());
        }
        Ok(())
    }

    /// The four block cascade steps against an open transaction.
    pub(crate) async fn apply_block_cascade(
        tx: &mut dyn RelationshipTransaction,
        requestor: &User,
        target: &User,
    ) -> Result<u64, GraphError> {
        let mut removed = tx
            .delete_friendship(FriendPair::new(requestor.id, target.id))
            .await?;
        let outgoing = Subscription::new(requestor.id, target.id);
        removed += tx.delete_subscription(outgoing).await?;
        removed += tx.delete_subscription(outgoing.reversed()).await?;
        tx.insert_block(Block::new(requestor.id, target.id)).await?;
        Ok(removed)
    }
}
