//! Request and response bodies.
//!
//! Request fields default to empty so that a missing field is reported by
//! validation rather than as a parse failure.

use crate::domain::error::ApiError;
use crate::domain::validation::Validator;
use serde::{Deserialize, Serialize};
use sg_relationship_graph::User;

/// Implemented by every request body; run before the core is called.
pub trait Validate {
    fn validate(&self) -> Result<(), ApiError>;
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegisterUserRequest {
    pub email: String,
}

impl Validate for RegisterUserRequest {
    fn validate(&self) -> Result<(), ApiError> {
        let mut v = Validator::new();
        v.check_email("email", &self.email);
        v.finish()
    }
}

/// Body of both `POST /friends` and `POST /friends/common`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FriendsRequest {
    pub friends: Vec<String>,
}

impl FriendsRequest {
    /// The two emails; only meaningful after `validate` succeeded.
    pub fn pair(&self) -> (&str, &str) {
        (self.friends[0].as_str(), self.friends[1].as_str())
    }
}

impl Validate for FriendsRequest {
    fn validate(&self) -> Result<(), ApiError> {
        let mut v = Validator::new();
        v.check(
            self.friends.len() == 2,
            "friends",
            "exactly 2 emails required",
        );
        for email in &self.friends {
            v.check_email("email", email);
        }
        v.finish()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FriendListRequest {
    pub email: String,
}

impl Validate for FriendListRequest {
    fn validate(&self) -> Result<(), ApiError> {
        let mut v = Validator::new();
        v.check_email("email", &self.email);
        v.finish()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SubscriptionRequest {
    pub requestor: String,
    pub target: String,
}

impl Validate for SubscriptionRequest {
    fn validate(&self) -> Result<(), ApiError> {
        let mut v = Validator::new();
        v.check_email("requestor", &self.requestor);
        v.check_email("target", &self.target);
        v.check(
            self.requestor.is_empty() || self.requestor != self.target,
            "emails",
            "Cannot subscribe to yourself",
        );
        v.finish()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BlockRequest {
    pub requestor: String,
    pub target: String,
}

impl Validate for BlockRequest {
    fn validate(&self) -> Result<(), ApiError> {
        let mut v = Validator::new();
        v.check_email("requestor", &self.requestor);
        v.check_email("target", &self.target);
        v.check(
            self.requestor.is_empty() || self.requestor != self.target,
            "emails",
            "Cannot block yourself",
        );
        v.finish()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RecipientsRequest {
    pub sender: String,
    pub text: String,
}

impl Validate for RecipientsRequest {
    fn validate(&self) -> Result<(), ApiError> {
        let mut v = Validator::new();
        v.check_email("sender", &self.sender);
        v.check(!self.text.is_empty(), "text", "text cannot be empty");
        v.finish()
    }
}

/// Acknowledgement for mutations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
    pub message: String,
}

impl SuccessResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub success: bool,
    pub user: User,
}

/// Body of both friend list and common friends responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FriendListResponse {
    pub success: bool,
    pub friends: Vec<String>,
    pub count: usize,
}

impl From<Vec<User>> for FriendListResponse {
    fn from(users: Vec<User>) -> Self {
        let friends: Vec<String> = users.into_iter().map(|u| u.email).collect();
        Self {
            success: true,
            count: friends.len(),
            friends,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipientsResponse {
    pub success: bool,
    pub recipients: Vec<String>,
}

impl From<Vec<User>> for RecipientsResponse {
    fn from(users: Vec<User>) -> Self {
        Self {
            success: true,
            recipients: users.into_iter().map(|u| u.email).collect(),
        }
    }
}
