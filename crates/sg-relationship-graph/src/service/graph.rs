//! # Social Graph API Implementation
//!
//! Implements the SocialGraphApi trait for mutations and queries.

use super::*;
use crate::domain::entities::{sort_by_email, FriendPair, Subscription, User, UserId};
use crate::domain::errors::GraphError;
use crate::ports::inbound::SocialGraphApi;
use async_trait::async_trait;
use std::collections::HashSet;
use tracing::{debug, info, warn};

#[async_trait]
impl<S> SocialGraphApi for SocialGraphService<S>
where
    S: RelationshipStore + ?Sized,
{
    async fn register_user(&self, email: &str) -> Result<User, GraphError> {
        let user = self.store.insert_user(email).await?;
        info!(user_id = %user.id, email = %user.email, "user registered");
        Ok(user)
    }

    async fn create_friendship(&self, email1: &str, email2: &str) -> Result<(), GraphError> {
        if email1 == email2 {
            return Err(GraphError::cannot_friend_self());
        }

        let (first, second) = self.resolve_pair(email1, email2).await?;
        self.ensure_not_blocked(&first, &second).await?;

        let pair = FriendPair::new(first.id, second.id);
        self.store.insert_friendship(pair).await?;

        info!(
            user1_id = %pair.low(),
            user2_id = %pair.high(),
            "friendship created"
        );
        Ok(())
    }

    async fn friend_list(&self, email: &str) -> Result<Vec<User>, GraphError> {
        let user = self.store.find_user_by_email(email).await?;
        let friends = self.store.friends_of(user.id).await?;
        debug!(email = %user.email, count = friends.len(), "friend list");
        Ok(friends)
    }

    async fn common_friends(&self, email1: &str, email2: &str) -> Result<Vec<User>, GraphError> {
        if email1 == email2 {
            return Err(GraphError::cannot_common_friends_with_self());
        }

        let (first, second) = self.resolve_pair(email1, email2).await?;
        let first_friends = self.store.friends_of(first.id).await?;
        let second_ids: HashSet<UserId> = self
            .store
            .friends_of(second.id)
            .await?
            .into_iter()
            .map(|u| u.id)
            .collect();

        let mut seen = HashSet::new();
        let mut common: Vec<User> = first_friends
            .into_iter()
            .filter(|u| second_ids.contains(&u.id) && seen.insert(u.id))
            .collect();
        sort_by_email(&mut common);

        debug!(count = common.len(), "common friends");
        Ok(common)
    }

    async fn create_subscription(&self, requestor: &str, target: &str) -> Result<(), GraphError> {
        let (subscriber, publisher) = self.resolve_pair(requestor, target).await?;
        self.ensure_not_blocked(&subscriber, &publisher).await?;

        self.store
            .insert_subscription(Subscription::new(subscriber.id, publisher.id))
            .await?;

        info!(
            subscriber_id = %subscriber.id,
            target_id = %publisher.id,
            "subscription created"
        );
        Ok(())
    }

    async fn create_block(&self, requestor: &str, target: &str) -> Result<(), GraphError> {
        let (blocker, blocked) = self.resolve_pair(requestor, target).await?;

        let mut tx = self.store.begin().await?;
        match Self::apply_block_cascade(&mut *tx, &blocker, &blocked).await {
            Ok(severed) => {
                tx.commit().await?;
                info!(
                    blocker_id = %blocker.id,
                    blocked_id = %blocked.id,
                    severed,
                    "block created"
                );
                Ok(())
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    warn!(error = %rollback_err, "block cascade rollback failed");
                }
                warn!(
                    blocker_id = %blocker.id,
                    blocked_id = %blocked.id,
                    kind = %err.kind(),
                    "block cascade aborted"
                );
                Err(err)
            }
        }
    }

    async fn resolve_recipients(&self, sender: &str, text: &str) -> Result<Vec<User>, GraphError> {
        let sender = self.store.find_user_by_email(sender).await?;
        self.resolver.resolve(&sender, text).await
    }
}
