//! In-memory Relationship Store
//!
//! All state lives behind a single `tokio::sync::RwLock`. A transaction holds
//! the owned write guard for its whole lifetime and journals its mutations,
//! so readers see either none or all of them.

use crate::domain::entities::{sort_by_email, Block, FriendPair, Subscription, User, UserId};
use crate::domain::errors::GraphError;
use crate::ports::outbound::{RelationshipStore, RelationshipTransaction};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::{OwnedRwLockWriteGuard, RwLock};
use tracing::debug;

#[derive(Debug, Default)]
struct GraphState {
    next_id: i64,
    users: HashMap<UserId, User>,
    emails: HashMap<String, UserId>,
    friendships: HashSet<FriendPair>,
    subscriptions: HashSet<Subscription>,
    blocks: HashSet<Block>,
}

impl GraphState {
    /// Mirrors a foreign-key check: relations may only reference known users.
    fn ensure_user(&self, id: UserId) -> Result<(), GraphError> {
        if self.users.contains_key(&id) {
            Ok(())
        } else {
            Err(GraphError::Database(format!(
                "foreign key violation: user {id} does not exist"
            )))
        }
    }

    fn ensure_users(&self, a: UserId, b: UserId) -> Result<(), GraphError> {
        self.ensure_user(a)?;
        self.ensure_user(b)
    }

    fn insert_user(&mut self, email: &str) -> Result<User, GraphError> {
        if self.emails.contains_key(email) {
            return Err(GraphError::email_taken(email));
        }
        self.next_id += 1;
        let user = User::new(self.next_id, email);
        self.emails.insert(user.email.clone(), user.id);
        self.users.insert(user.id, user.clone());
        Ok(user)
    }

    fn users_for(&self, ids: impl IntoIterator<Item = UserId>) -> Vec<User> {
        let mut users: Vec<User> = ids
            .into_iter()
            .collect::<HashSet<_>>()
            .into_iter()
            .filter_map(|id| self.users.get(&id).cloned())
            .collect();
        sort_by_email(&mut users);
        users
    }

    fn insert_block(&mut self, block: Block) -> Result<(), GraphError> {
        self.ensure_users(block.blocker, block.blocked)?;
        if !self.blocks.insert(block) {
            return Err(GraphError::already_blocked());
        }
        Ok(())
    }
}

/// Thread-safe in-memory implementation of `RelationshipStore`.
///
/// Cloning shares the underlying state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRelationshipStore {
    state: Arc<RwLock<GraphState>>,
}

impl InMemoryRelationshipStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RelationshipStore for InMemoryRelationshipStore {
    async fn insert_user(&self, email: &str) -> Result<User, GraphError> {
        self.state.write().await.insert_user(email)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<User, GraphError> {
        let state = self.state.read().await;
        state
            .emails
            .get(email)
            .and_then(|id| state.users.get(id))
            .cloned()
            .ok_or_else(|| GraphError::user_not_found(email))
    }

    async fn find_users_by_emails(&self, emails: &[String]) -> Result<Vec<User>, GraphError> {
        if emails.is_empty() {
            return Ok(Vec::new());
        }
        let state = self.state.read().await;
        let ids = emails.iter().filter_map(|email| state.emails.get(email).copied());
        Ok(state.users_for(ids))
    }

    async fn insert_friendship(&self, pair: FriendPair) -> Result<(), GraphError> {
        let mut state = self.state.write().await;
        if pair.is_degenerate() {
            return Err(GraphError::Database(
                "check constraint violation: friendship members must differ".into(),
            ));
        }
        state.ensure_users(pair.low(), pair.high())?;
        if !state.friendships.insert(pair) {
            return Err(GraphError::already_friends());
        }
        Ok(())
    }

    async fn delete_friendship(&self, pair: FriendPair) -> Result<u64, GraphError> {
        let removed = self.state.write().await.friendships.remove(&pair);
        Ok(removed as u64)
    }

    async fn insert_subscription(&self, subscription: Subscription) -> Result<(), GraphError> {
        let mut state = self.state.write().await;
        state.ensure_users(subscription.subscriber, subscription.target)?;
        if !state.subscriptions.insert(subscription) {
            return Err(GraphError::already_subscribed());
        }
        Ok(())
    }

    async fn delete_subscription(&self, subscription: Subscription) -> Result<u64, GraphError> {
        let removed = self.state.write().await.subscriptions.remove(&subscription);
        Ok(removed as u64)
    }

    async fn insert_block(&self, block: Block) -> Result<(), GraphError> {
        self.state.write().await.insert_block(block)
    }

    async fn block_exists(&self, block: Block) -> Result<bool, GraphError> {
        Ok(self.state.read().await.blocks.contains(&block))
    }

    async fn blocks_involving(
        &self,
        user: UserId,
        others: &[UserId],
    ) -> Result<Vec<Block>, GraphError> {
        if others.is_empty() {
            return Ok(Vec::new());
        }
        let others: HashSet<UserId> = others.iter().copied().collect();
        let state = self.state.read().await;
        Ok(state
            .blocks
            .iter()
            .filter(|block| {
                (block.blocker == user && others.contains(&block.blocked))
                    || (block.blocked == user && others.contains(&block.blocker))
            })
            .copied()
            .collect())
    }

    async fn friends_of(&self, id: UserId) -> Result<Vec<User>, GraphError> {
        let state = self.state.read().await;
        let ids = state
            .friendships
            .iter()
            .filter_map(|pair| pair.other(id))
            .filter(|other| *other != id);
        Ok(state.users_for(ids))
    }

    async fn subscribers_of(&self, id: UserId) -> Result<Vec<User>, GraphError> {
        let state = self.state.read().await;
        let ids = state
            .subscriptions
            .iter()
            .filter(|sub| sub.target == id)
            .map(|sub| sub.subscriber);
        Ok(state.users_for(ids))
    }

    async fn begin(&self) -> Result<Box<dyn RelationshipTransaction>, GraphError> {
        let guard = Arc::clone(&self.state).write_owned().await;
        Ok(Box::new(MemoryTransaction {
            guard: Some(guard),
            journal: Vec::new(),
        }))
    }
}

#[derive(Debug, Clone, Copy)]
enum JournalEntry {
    DeleteFriendship(FriendPair),
    DeleteSubscription(Subscription),
    InsertBlock(Block),
}

/// Transaction over the in-memory store.
///
/// Mutations are validated against the locked state plus the journal and only
/// applied on `commit`.
struct MemoryTransaction {
    guard: Option<OwnedRwLockWriteGuard<GraphState>>,
    journal: Vec<JournalEntry>,
}

impl MemoryTransaction {
    fn state(&self) -> Result<&GraphState, GraphError> {
        self.guard
            .as_deref()
            .ok_or_else(|| GraphError::Database("transaction already finished".into()))
    }

    fn journaled(&self, entry: impl Fn(&JournalEntry) -> bool) -> bool {
        self.journal.iter().any(entry)
    }
}

#[async_trait]
impl RelationshipTransaction for MemoryTransaction {
    async fn delete_friendship(&mut self, pair: FriendPair) -> Result<u64, GraphError> {
        let present = self.state()?.friendships.contains(&pair)
            && !self.journaled(|e| matches!(e, JournalEntry::DeleteFriendship(p) if *p == pair));
        if present {
            self.journal.push(JournalEntry::DeleteFriendship(pair));
        }
        Ok(present as u64)
    }

    async fn delete_subscription(
        &mut self,
        subscription: Subscription,
    ) -> Result<u64, GraphError> {
        let present = self.state()?.subscriptions.contains(&subscription)
            && !self.journaled(
                |e| matches!(e, JournalEntry::DeleteSubscription(s) if *s == subscription),
            );
        if present {
            self.journal.push(JournalEntry::DeleteSubscription(subscription));
        }
        Ok(present as u64)
    }

    async fn insert_block(&mut self, block: Block) -> Result<(), GraphError> {
        let state = self.state()?;
        state.ensure_users(block.blocker, block.blocked)?;
        if state.blocks.contains(&block)
            || self.journaled(|e| matches!(e, JournalEntry::InsertBlock(b) if *b == block))
        {
            return Err(GraphError::already_blocked());
        }
        self.journal.push(JournalEntry::InsertBlock(block));
        Ok(())
    }

    async fn commit(&mut self) -> Result<(), GraphError> {
        let mut guard = self
            .guard
            .take()
            .ok_or_else(|| GraphError::Database("transaction already finished".into()))?;
        let applied = self.journal.len();
        for entry in self.journal.drain(..) {
            match entry {
                JournalEntry::DeleteFriendship(pair) => {
                    guard.friendships.remove(&pair);
                }
                JournalEntry::DeleteSubscription(sub) => {
                    guard.subscriptions.remove(&sub);
                }
                JournalEntry::InsertBlock(block) => {
                    guard.blocks.insert(block);
                }
            }
        }
        debug!(applied, "memory transaction committed");
        Ok(())
    }

    async fn rollback(&mut self) -> Result<(), GraphError> {
        self.journal.clear();
        self.guard = None;
        Ok(())
    }
}
