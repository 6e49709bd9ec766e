//! # HTTP End-to-End
//!
//! A full node on a loopback socket, driven by a real HTTP client.

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;

    use reqwest::StatusCode;
    use serde_json::{json, Value};
    use sg_node::{NodeConfig, SocialGraphNode};
    use sg_relationship_graph::test_utils::{ANDY, JOHN, KATE, LISA};
    use sg_relationship_graph::StoreConfig;
    use tokio::sync::oneshot;
    use tokio::task::JoinHandle;

    struct TestNode {
        addr: SocketAddr,
        client: reqwest::Client,
        shutdown: Option<oneshot::Sender<()>>,
        handle: JoinHandle<Result<(), String>>,
    }

    impl TestNode {
        async fn start(store: StoreConfig) -> Self {
            let mut config = NodeConfig {
                store,
                ..Default::default()
            };
            config.gateway.host = "127.0.0.1".parse().unwrap();
            config.gateway.port = 0;

            let node = SocialGraphNode::new(config).await.unwrap();
            let listener = node.gateway().bind().await.unwrap();
            let addr = listener.local_addr().unwrap();

            let (tx, rx) = oneshot::channel::<()>();
            let handle = tokio::spawn(async move {
                node.serve_on(listener, async {
                    let _ = rx.await;
                })
                .await
                .map_err(|e| e.to_string())
            });

            Self {
                addr,
                client: reqwest::Client::new(),
                shutdown: Some(tx),
                handle,
            }
        }

        async fn post(&self, path: &str, body: Value) -> (StatusCode, Value) {
            let response = self
                .client
                .post(format!("http://{}/api/v1{path}", self.addr))
                .json(&body)
                .send()
                .await
                .unwrap();
            let status = response.status();
            let body = response.json::<Value>().await.unwrap_or(Value::Null);
            (status, body)
        }

        async fn stop(mut self) {
            if let Some(tx) = self.shutdown.take() {
                let _ = tx.send(());
            }
            self.handle.await.unwrap().unwrap();
        }
    }

    async fn scenario(node: &TestNode) {
        for email in [ANDY, JOHN, KATE, LISA] {
            let (status, _) = node.post("/users", json!({ "email": email })).await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (status, body) = node.post("/friends", json!({ "friends": [ANDY, JOHN] })).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "Friendship created successfully");

        node.post("/friends", json!({ "friends": [KATE, JOHN] })).await;

        let (status, body) = node
            .post("/friends/common", json!({ "friends": [ANDY, KATE] }))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["friends"], json!([JOHN]));
        assert_eq!(body["count"], 1);

        let (status, _) = node
            .post("/subscriptions", json!({ "requestor": LISA, "target": ANDY }))
            .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = node
            .post(
                "/recipients",
                json!({ "sender": ANDY, "text": format!("Hello World! {KATE}") }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["recipients"], json!([JOHN, KATE, LISA]));

        let (status, _) = node
            .post("/blocks", json!({ "requestor": JOHN, "target": ANDY }))
            .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = node.post("/friends", json!({ "friends": [ANDY, JOHN] })).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["success"], false);

        let (status, body) = node.post("/friends/list", json!({ "email": ANDY })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["friends"], json!([]));
        assert_eq!(body["count"], 0);
    }

    #[tokio::test]
    async fn test_full_flow_over_memory_store() {
        let node = TestNode::start(StoreConfig::memory()).await;
        scenario(&node).await;
        node.stop().await;
    }

    #[tokio::test]
    async fn test_full_flow_over_sqlite_store() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = StoreConfig {
            database_url: format!("sqlite://{}", dir.path().join("e2e.db").display()),
            max_connections: 4,
            ..Default::default()
        };
        let node = TestNode::start(store).await;
        scenario(&node).await;
        node.stop().await;
    }

    #[tokio::test]
    async fn test_error_envelope_over_the_wire() {
        let node = TestNode::start(StoreConfig::memory()).await;

        let (status, body) = node
            .post("/friends/list", json!({ "email": "nobody@example.com" }))
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["type"], "NOT_FOUND");

        let (status, body) = node.post("/recipients", json!({ "sender": ANDY })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["type"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["details"], "text: text cannot be empty");

        let response = node
            .client
            .get(format!("http://{}/api/v1/health", node.addr))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let health: Value = response.json().await.unwrap();
        assert_eq!(health["status"], "healthy");

        node.stop().await;
    }
}
