//! # Integration Test Flows
//!
//! Longer scenarios that chain every graph operation, run once per store
//! backend so memory and SQLite cannot drift apart.

#[cfg(test)]
mod tests {
    use sg_relationship_graph::test_utils::{all_services, ANDY, JOHN, KATE, LISA, MARK};
    use sg_relationship_graph::{ErrorKind, SocialGraphApi, User};

    fn emails(users: &[User]) -> Vec<&str> {
        users.iter().map(|u| u.email.as_str()).collect()
    }

    async fn register_all(graph: &dyn SocialGraphApi, list: &[&str]) {
        for email in list {
            graph.register_user(email).await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_feed_audience_evolves_with_relations() {
        for (backend, graph) in all_services().await {
            register_all(&graph, &[ANDY, JOHN, KATE, LISA, MARK]).await;

            graph.create_friendship(ANDY, JOHN).await.unwrap();
            graph.create_friendship(ANDY, KATE).await.unwrap();
            graph.create_subscription(LISA, ANDY).await.unwrap();

            let audience = graph.resolve_recipients(ANDY, "morning all").await.unwrap();
            assert_eq!(emails(&audience), vec![JOHN, KATE, LISA], "{backend}");

            // KATE blocks ANDY: she drops out even when mentioned
            graph.create_block(KATE, ANDY).await.unwrap();
            let audience = graph
                .resolve_recipients(ANDY, &format!("ping {KATE} and {MARK}"))
                .await
                .unwrap();
            assert_eq!(emails(&audience), vec![JOHN, LISA, MARK], "{backend}");

            assert_eq!(
                emails(&graph.friend_list(ANDY).await.unwrap()),
                vec![JOHN],
                "{backend}"
            );
        }
    }

    #[tokio::test]
    async fn test_block_cascade_clears_both_directions() {
        for (backend, graph) in all_services().await {
            register_all(&graph, &[ANDY, JOHN]).await;

            graph.create_friendship(ANDY, JOHN).await.unwrap();
            graph.create_subscription(ANDY, JOHN).await.unwrap();
            graph.create_subscription(JOHN, ANDY).await.unwrap();

            graph.create_block(JOHN, ANDY).await.unwrap();

            assert!(graph.friend_list(ANDY).await.unwrap().is_empty(), "{backend}");
            assert!(
                graph.resolve_recipients(ANDY, "hi").await.unwrap().is_empty(),
                "{backend}"
            );
            assert!(
                graph.resolve_recipients(JOHN, "hi").await.unwrap().is_empty(),
                "{backend}"
            );

            // Neither side can rebuild the relation
            for (a, b) in [(ANDY, JOHN), (JOHN, ANDY)] {
                let err = graph.create_friendship(a, b).await.unwrap_err();
                assert_eq!(err.kind(), ErrorKind::Forbidden, "{backend}");
                let err = graph.create_subscription(a, b).await.unwrap_err();
                assert_eq!(err.kind(), ErrorKind::Forbidden, "{backend}");
            }
        }
    }

    #[tokio::test]
    async fn test_unknown_mentions_are_ignored() {
        for (backend, graph) in all_services().await {
            register_all(&graph, &[ANDY, KATE]).await;

            let audience = graph
                .resolve_recipients(ANDY, "cc ghost@example.com, kate@example.com")
                .await
                .unwrap();
            assert_eq!(emails(&audience), vec![KATE], "{backend}");
        }
    }

    #[tokio::test]
    async fn test_friend_subscriber_and_mention_deduplicate() {
        for (backend, graph) in all_services().await {
            register_all(&graph, &[ANDY, JOHN]).await;

            graph.create_friendship(ANDY, JOHN).await.unwrap();
            graph.create_subscription(JOHN, ANDY).await.unwrap();

            let audience = graph
                .resolve_recipients(ANDY, &format!("{JOHN} {JOHN}"))
                .await
                .unwrap();
            assert_eq!(emails(&audience), vec![JOHN], "{backend}");
        }
    }

    #[tokio::test]
    async fn test_common_friends_across_many_users() {
        for (backend, graph) in all_services().await {
            register_all(&graph, &[ANDY, JOHN, KATE, LISA, MARK]).await;

            for friend in [KATE, LISA, MARK] {
                graph.create_friendship(ANDY, friend).await.unwrap();
            }
            for friend in [MARK, KATE] {
                graph.create_friendship(friend, JOHN).await.unwrap();
            }

            let common = graph.common_friends(JOHN, ANDY).await.unwrap();
            assert_eq!(emails(&common), vec![KATE, MARK], "{backend}");

            let err = graph.common_friends(ANDY, ANDY).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Business, "{backend}");
        }
    }

    #[tokio::test]
    async fn test_error_kinds_are_stable_across_backends() {
        for (backend, graph) in all_services().await {
            register_all(&graph, &[ANDY, JOHN]).await;

            graph.create_subscription(ANDY, JOHN).await.unwrap();
            let err = graph.create_subscription(ANDY, JOHN).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Conflict, "{backend}");

            let err = graph.friend_list(MARK).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::NotFound, "{backend}");

            let err = graph.create_block(ANDY, MARK).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::NotFound, "{backend}");

            let err = graph.register_user(JOHN).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Conflict, "{backend}");
        }
    }
}
