//! Route handlers.
//!
//! Each handler validates its body, calls the social graph and records the
//! outcome against the operation's metrics.

use crate::domain::error::{ApiError, ApiResult};
use crate::domain::types::*;
use crate::middleware::ApiJson;
use crate::router::AppState;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use sg_relationship_graph::GraphError;
use sg_telemetry::{log_relation_event, record_outcome, time_operation, RECIPIENT_FANOUT, RELATIONS_CREATED};
use tracing::warn;

/// Record the outcome label for `operation` and convert the error.
fn observe<T>(operation: &str, result: Result<T, GraphError>) -> ApiResult<T> {
    match result {
        Ok(value) => {
            record_outcome(operation, "ok");
            Ok(value)
        }
        Err(err) => {
            record_outcome(operation, err.kind().code());
            warn!(operation, kind = %err.kind(), error = %err, "request failed");
            Err(err.into())
        }
    }
}

/// Validation failures are counted like any other outcome.
fn validated<R: Validate>(operation: &str, request: &R) -> ApiResult<()> {
    request.validate().map_err(|err| {
        record_outcome(operation, err.kind.code());
        err
    })
}

pub async fn register_user(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RegisterUserRequest>,
) -> ApiResult<impl IntoResponse> {
    let _timer = time_operation!("register_user");
    validated("register_user", &req)?;

    let user = observe("register_user", state.graph.register_user(&req.email).await)?;
    RELATIONS_CREATED.with_label_values(&["user"]).inc();

    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            success: true,
            user,
        }),
    ))
}

pub async fn create_friendship(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<FriendsRequest>,
) -> ApiResult<impl IntoResponse> {
    let _timer = time_operation!("create_friendship");
    validated("create_friendship", &req)?;
    let (first, second) = req.pair();

    observe(
        "create_friendship",
        state.graph.create_friendship(first, second).await,
    )?;
    RELATIONS_CREATED.with_label_values(&["friendship"]).inc();
    log_relation_event!(info, "friendship", "friendship created", first, second);

    Ok((
        StatusCode::CREATED,
        Json(SuccessResponse::new("Friendship created successfully")),
    ))
}

pub async fn friend_list(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<FriendListRequest>,
) -> ApiResult<Json<FriendListResponse>> {
    let _timer = time_operation!("friend_list");
    validated("friend_list", &req)?;

    let friends = observe("friend_list", state.graph.friend_list(&req.email).await)?;
    Ok(Json(friends.into()))
}

pub async fn common_friends(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<FriendsRequest>,
) -> ApiResult<Json<FriendListResponse>> {
    let _timer = time_operation!("common_friends");
    validated("common_friends", &req)?;
    let (first, second) = req.pair();

    let common = observe(
        "common_friends",
        state.graph.common_friends(first, second).await,
    )?;
    Ok(Json(common.into()))
}

pub async fn create_subscription(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SubscriptionRequest>,
) -> ApiResult<impl IntoResponse> {
    let _timer = time_operation!("create_subscription");
    validated("create_subscription", &req)?;

    observe(
        "create_subscription",
        state
            .graph
            .create_subscription(&req.requestor, &req.target)
            .await,
    )?;
    RELATIONS_CREATED.with_label_values(&["subscription"]).inc();
    log_relation_event!(info, "subscription", "subscription created", req.requestor, req.target);

    Ok((
        StatusCode::CREATED,
        Json(SuccessResponse::new("Subscription created successfully")),
    ))
}

pub async fn create_block(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<BlockRequest>,
) -> ApiResult<impl IntoResponse> {
    let _timer = time_operation!("create_block");
    validated("create_block", &req)?;

    observe(
        "create_block",
        state.graph.create_block(&req.requestor, &req.target).await,
    )?;
    RELATIONS_CREATED.with_label_values(&["block"]).inc();
    log_relation_event!(info, "block", "block created", req.requestor, req.target);

    Ok((
        StatusCode::CREATED,
        Json(SuccessResponse::new("Block created successfully")),
    ))
}

pub async fn resolve_recipients(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RecipientsRequest>,
) -> ApiResult<Json<RecipientsResponse>> {
    let _timer = time_operation!("resolve_recipients");
    validated("resolve_recipients", &req)?;

    let recipients = observe(
        "resolve_recipients",
        state.graph.resolve_recipients(&req.sender, &req.text).await,
    )?;
    RECIPIENT_FANOUT.observe(recipients.len() as f64);
    Ok(Json(recipients.into()))
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "social-graph",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Prometheus text exposition
pub async fn metrics() -> ApiResult<impl IntoResponse> {
    let body = sg_telemetry::encode_metrics().map_err(|e| ApiError::internal(e.to_string()))?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        body,
    ))
}
