//! File-backed SQLite: relations survive closing and reopening the store.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use sg_relationship_graph::test_utils::{ANDY, JOHN, KATE};
    use sg_relationship_graph::{
        ErrorKind, RelationshipStore, SocialGraphApi, SocialGraphService, SqliteRelationshipStore,
        SqliteStoreBuilder,
    };
    use tempfile::TempDir;

    async fn open(dir: &TempDir, migrate: bool) -> SqliteRelationshipStore {
        let url = format!("sqlite://{}", dir.path().join("graph.db").display());
        SqliteStoreBuilder::new()
            .database_url(&url)
            .max_connections(4)
            .run_migrations(migrate)
            .build()
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_relations_survive_reopen() {
        let dir = TempDir::new().unwrap();

        {
            let store = open(&dir, true).await;
            let pool = store.pool().clone();
            let graph = SocialGraphService::new(Arc::new(store));
            for email in [ANDY, JOHN, KATE] {
                graph.register_user(email).await.unwrap();
            }
            graph.create_friendship(ANDY, JOHN).await.unwrap();
            graph.create_subscription(KATE, ANDY).await.unwrap();
            graph.create_block(JOHN, KATE).await.unwrap();
            pool.close().await;
        }

        let store = Arc::new(open(&dir, true).await);
        let graph = SocialGraphService::new(Arc::clone(&store));

        let friends = graph.friend_list(ANDY).await.unwrap();
        assert_eq!(friends.len(), 1);
        assert_eq!(friends[0].email, JOHN);

        let audience = graph.resolve_recipients(ANDY, "hello").await.unwrap();
        let emails: Vec<_> = audience.iter().map(|u| u.email.as_str()).collect();
        assert_eq!(emails, vec![JOHN, KATE]);

        let john = store.find_user_by_email(JOHN).await.unwrap();
        let kate = store.find_user_by_email(KATE).await.unwrap();
        assert!(graph.block_guard().is_blocked_either_way(kate.id, john.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_unmigrated_database_reports_database_error() {
        let dir = TempDir::new().unwrap();
        let graph = SocialGraphService::new(Arc::new(open(&dir, false).await));

        let err = graph.register_user(ANDY).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Database);
    }
}
