//! # Block Guard
//!
//! Answers "is either party blocking the other?" for single pairs and for
//! a sender against many candidates at once.

use crate::domain::entities::{Block, UserId};
use crate::domain::errors::GraphError;
use crate::ports::outbound::RelationshipStore;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::trace;

pub struct BlockGuard<S: ?Sized> {
    store: Arc<S>,
}

impl<S: ?Sized> Clone for BlockGuard<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S> BlockGuard<S>
where
    S: RelationshipStore + ?Sized,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// True iff `a` blocks `b` or `b` blocks `a`. The reverse direction is
    /// only queried when the forward one is absent.
    pub async fn is_blocked_either_way(&self, a: UserId, b: UserId) -> Result<bool, GraphError> {
        if self.store.block_exists(Block::new(a, b)).await? {
            trace!(blocker = %a, blocked = %b, "forward block found");
            return Ok(true);
        }
        self.store.block_exists(Block::new(b, a)).await
    }

    /// Block status between `sender` and every candidate.
    ///
    /// Every distinct candidate gets an entry. The store is consulted with a
    /// single bulk query regardless of how many candidates are supplied, and
    /// not at all for an empty list.
    pub async fn are_blocked_batch(
        &self,
        sender: UserId,
        candidates: &[UserId],
    ) -> Result<HashMap<UserId, bool>, GraphError> {
        let mut status: HashMap<UserId, bool> =
            candidates.iter().map(|&id| (id, false)).collect();
        if status.is_empty() {
            return Ok(status);
        }

        let distinct: Vec<UserId> = status.keys().copied().collect();
        let blocks = self.store.blocks_involving(sender, &distinct).await?;

        for block in blocks {
            if let Some(other) = block.counterpart(sender) {
                if let Some(flag) = status.get_mut(&other) {
                    *flag = true;
                }
            }
        }

        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryRelationshipStore;
    use crate::domain::entities::User;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts bulk lookups on top of the memory store.
    #[derive(Default)]
    struct CountingStore {
        inner: InMemoryRelationshipStore,
        bulk_calls: AtomicUsize,
    }

    #[async_trait]
    impl RelationshipStore for CountingStore {
        async fn insert_user(&self, email: &str) -> Result<User, GraphError> {
            self.inner.insert_user(email).await
        }
        async fn find_user_by_email(&self, email: &str) -> Result<User, GraphError> {
            self.inner.find_user_by_email(email).await
        }
        async fn find_users_by_emails(&self, emails: &[String]) -> Result<Vec<User>, GraphError> {
            self.inner.find_users_by_emails(emails).await
        }
        async fn insert_friendship(
            &self,
            pair: crate::domain::entities::FriendPair,
        ) -> Result<(), GraphError> {
            self.inner.insert_friendship(pair).await
        }
        async fn delete_friendship(
            &self,
            pair: crate::domain::entities::FriendPair,
        ) -> Result<u64, GraphError> {
            self.inner.delete_friendship(pair).await
        }
        async fn insert_subscription(
            &self,
            subscription: crate::domain::entities::Subscription,
        ) -> Result<(), GraphError> {
            self.inner.insert_subscription(subscription).await
        }
        async fn delete_subscription(
            &self,
            subscription: crate::domain::entities::Subscription,
        ) -> Result<u64, GraphError> {
            self.inner.delete_subscription(subscription).await
        }
        async fn insert_block(&self, block: Block) -> Result<(), GraphError> {
            self.inner.insert_block(block).await
        }
        async fn block_exists(&self, block: Block) -> Result<bool, GraphError> {
            self.inner.block_exists(block).await
        }
        async fn blocks_involving(
            &self,
            user: UserId,
            others: &[UserId],
        ) -> Result<Vec<Block>, GraphError> {
            self.bulk_calls.fetch_add(1, Ordering::SeqCst);
            self.inner.blocks_involving(user, others).await
        }
        async fn friends_of(&self, id: UserId) -> Result<Vec<User>, GraphError> {
            self.inner.friends_of(id).await
        }
        async fn subscribers_of(&self, id: UserId) -> Result<Vec<User>, GraphError> {
            self.inner.subscribers_of(id).await
        }
        async fn begin(
            &self,
        ) -> Result<Box<dyn crate::ports::outbound::RelationshipTransaction>, GraphError> {
            self.inner.begin().await
        }
    }

    async fn users(store: &CountingStore, n: usize) -> Vec<UserId> {
        let mut ids = Vec::with_capacity(n);
        for i in 0..n {
            ids.push(
                store
                    .insert_user(&format!("user{i}@example.com"))
                    .await
                    .unwrap()
                    .id,
            );
        }
        ids
    }

    #[tokio::test]
    async fn test_either_direction_counts() {
        let store = Arc::new(CountingStore::default());
        let ids = users(&store, 3).await;
        store.insert_block(Block::new(ids[1], ids[0])).await.unwrap();

        let guard = BlockGuard::new(Arc::clone(&store));
        assert!(guard.is_blocked_either_way(ids[0], ids[1]).await.unwrap());
        assert!(guard.is_blocked_either_way(ids[1], ids[0]).await.unwrap());
        assert!(!guard.is_blocked_either_way(ids[0], ids[2]).await.unwrap());
    }

    #[tokio::test]
    async fn test_empty_batch_skips_store() {
        let store = Arc::new(CountingStore::default());
        let ids = users(&store, 1).await;

        let guard = BlockGuard::new(Arc::clone(&store));
        let status = guard.are_blocked_batch(ids[0], &[]).await.unwrap();

        assert!(status.is_empty());
        assert_eq!(store.bulk_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_batch_is_single_round_trip() {
        let store = Arc::new(CountingStore::default());
        let ids = users(&store, 6).await;
        let sender = ids[0];
        store.insert_block(Block::new(sender, ids[2])).await.unwrap();
        store.insert_block(Block::new(ids[4], sender)).await.unwrap();
        // Unrelated to the sender.
        store.insert_block(Block::new(ids[3], ids[5])).await.unwrap();

        let guard = BlockGuard::new(Arc::clone(&store));
        let candidates = vec![ids[1], ids[2], ids[3], ids[4], ids[5], ids[2]];
        let status = guard.are_blocked_batch(sender, &candidates).await.unwrap();

        assert_eq!(store.bulk_calls.load(Ordering::SeqCst), 1);
        assert_eq!(status.len(), 5);
        assert_eq!(status[&ids[1]], false);
        assert_eq!(status[&ids[2]], true);
        assert_eq!(status[&ids[3]], false);
        assert_eq!(status[&ids[4]], true);
        assert_eq!(status[&ids[5]], false);
    }
}
