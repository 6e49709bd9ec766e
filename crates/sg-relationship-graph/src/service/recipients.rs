//! # Recipient Resolver
//!
//! Audience of a message = friends ∪ subscribers ∪ mentioned users that
//! are not blocked either way with the sender.

use super::block_guard::BlockGuard;
use crate::domain::entities::{sort_by_email, User, UserId};
use crate::domain::errors::GraphError;
use crate::domain::mentions::distinct_mentions;
use crate::ports::outbound::RelationshipStore;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

pub struct RecipientResolver<S: ?Sized> {
    store: Arc<S>,
    guard: BlockGuard<S>,
}

impl<S> RecipientResolver<S>
where
    S: RelationshipStore + ?Sized,
{
    pub fn new(store: Arc<S>, guard: BlockGuard<S>) -> Self {
        Self { store, guard }
    }

    /// Resolve the audience for `text` sent by an already-resolved `sender`.
    ///
    /// A sender mentioning themself is treated like any other mention.
    /// Output is sorted by email so repeated calls yield identical lists.
    pub async fn resolve(&self, sender: &User, text: &str) -> Result<Vec<User>, GraphError> {
        let mentioned_emails = distinct_mentions(text);
        let mentioned = if mentioned_emails.is_empty() {
            Vec::new()
        } else {
            self.store.find_users_by_emails(&mentioned_emails).await?
        };

        let friends = self.store.friends_of(sender.id).await?;
        let subscribers = self.store.subscribers_of(sender.id).await?;

        let mut audience: HashMap<UserId, User> = HashMap::new();
        for user in friends.into_iter().chain(subscribers) {
            audience.insert(user.id, user);
        }

        let mut excluded = 0usize;
        if !mentioned.is_empty() {
            let ids: Vec<UserId> = mentioned.iter().map(|u| u.id).collect();
            let blocked = self.guard.are_blocked_batch(sender.id, &ids).await?;

            for user in mentioned {
                if blocked.get(&user.id).copied().unwrap_or(false) {
                    excluded += 1;
                    continue;
                }
                audience.insert(user.id, user);
            }
        }

        let mut recipients: Vec<User> = audience.into_values().collect();
        sort_by_email(&mut recipients);

        debug!(
            sender = %sender.email,
            mentions = mentioned_emails.len(),
            excluded,
            recipients = recipients.len(),
            "recipients resolved"
        );
        Ok(recipients)
    }
}
