//! Shared fixtures for unit and integration tests.

use crate::adapters::InMemoryRelationshipStore;
use crate::domain::entities::User;
use crate::ports::outbound::RelationshipStore;
use crate::service::SocialGraphService;
use std::sync::Arc;

pub const ANDY: &str = "andy@example.com";
pub const JOHN: &str = "john@example.com";
pub const KATE: &str = "kate@example.com";
pub const LISA: &str = "lisa@example.com";
pub const MARK: &str = "mark@example.com";

/// Insert users in order; panics on failure since fixtures must not fail.
pub async fn seed_users<S>(store: &S, emails: &[&str]) -> Vec<User>
where
    S: RelationshipStore + ?Sized,
{
    let mut users = Vec::with_capacity(emails.len());
    for email in emails {
        let user = store
            .insert_user(email)
            .await
            .unwrap_or_else(|e| panic!("seeding {email} failed: {e}"));
        users.push(user);
    }
    users
}

pub fn memory_service() -> SocialGraphService<InMemoryRelationshipStore> {
    SocialGraphService::new(Arc::new(InMemoryRelationshipStore::new()))
}

/// A service over a fresh, private in-memory SQLite database.
#[cfg(feature = "sqlite")]
pub async fn sqlite_service() -> SocialGraphService<crate::adapters::SqliteRelationshipStore> {
    let store = crate::adapters::SqliteStoreBuilder::new()
        .random_memory_url()
        .build()
        .await
        .unwrap_or_else(|e| panic!("temporary sqlite store failed: {e}"));
    SocialGraphService::new(Arc::new(store))
}

/// One service per compiled-in backend, for running a scenario against all
/// of them.
pub async fn all_services() -> Vec<(&'static str, SocialGraphService<dyn RelationshipStore>)> {
    let memory: Arc<dyn RelationshipStore> = Arc::new(InMemoryRelationshipStore::new());
    #[allow(unused_mut)]
    let mut services = vec![("memory", SocialGraphService::new(memory))];

    #[cfg(feature = "sqlite")]
    {
        let store = crate::adapters::SqliteStoreBuilder::new()
            .random_memory_url()
            .build()
            .await
            .unwrap_or_else(|e| panic!("temporary sqlite store failed: {e}"));
        let sqlite: Arc<dyn RelationshipStore> = Arc::new(store);
        services.push(("sqlite", SocialGraphService::new(sqlite)));
    }

    services
}
