//! # Social Graph Service
//!
//! The main service implementing the Social Graph API.
//!
//! ## Architecture
//!
//! This service:
//! 1. Implements `SocialGraphApi` for mutations and queries
//! 2. Gates friendship and subscription writes through the `BlockGuard`
//! 3. Runs the block cascade as one store transaction
//! 4. Takes the `RelationshipStore` by injection, so any adapter fits

mod block_guard;
mod graph;
mod helpers;
mod recipients;

pub use block_guard::BlockGuard;
pub use recipients::RecipientResolver;

use crate::ports::outbound::RelationshipStore;
use std::sync::Arc;

/// The Social Graph Service.
///
/// Holds no mutable state of its own; every call is request-scoped and all
/// consistency is delegated to the store.
pub struct SocialGraphService<S: ?Sized> {
    pub(crate) store: Arc<S>,
    pub(crate) guard: BlockGuard<S>,
    pub(crate) resolver: RecipientResolver<S>,
}

impl<S> SocialGraphService<S>
where
    S: RelationshipStore + ?Sized,
{
    pub fn new(store: Arc<S>) -> Self {
        let guard = BlockGuard::new(Arc::clone(&store));
        let resolver = RecipientResolver::new(Arc::clone(&store), guard.clone());
        Self {
            store,
            guard,
            resolver,
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn block_guard(&self) -> &BlockGuard<S> {
        &self.guard
    }
}
