//! # Core Entities
//!
//! Users and the three relation kinds stored by the Relationship Store.
//!
//! ## Invariants
//!
//! - A `FriendPair` is always canonical: `low < high` once it reaches a store.
//! - `Subscription` and `Block` are directed; the reverse is a different row.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric user identity assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl UserId {
    /// Raw integer value, as persisted.
    pub fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// A registered user. Emails are unique and compared case-sensitively.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
}

impl User {
    pub fn new(id: impl Into<UserId>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
        }
    }
}

/// Unordered friendship between two users, kept in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FriendPair {
    low: UserId,
    high: UserId,
}

impl FriendPair {
    /// Build the canonical representation of `{a, b}`.
    ///
    /// `new(a, b) == new(b, a)` for every pair, so the same friendship can
    /// never be encoded as two different rows.
    pub fn new(a: UserId, b: UserId) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    pub fn low(&self) -> UserId {
        self.low
    }

    pub fn high(&self) -> UserId {
        self.high
    }

    /// True when both sides name the same user. Stores reject such pairs.
    pub fn is_degenerate(&self) -> bool {
        self.low == self.high
    }

    /// The other member of the pair, if `id` is part of it.
    pub fn other(&self, id: UserId) -> Option<UserId> {
        if self.low == id {
            Some(self.high)
        } else if self.high == id {
            Some(self.low)
        } else {
            None
        }
    }
}

/// Directed subscription: `subscriber` receives updates from `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Subscription {
    pub subscriber: UserId,
    pub target: UserId,
}

impl Subscription {
    pub fn new(subscriber: UserId, target: UserId) -> Self {
        Self { subscriber, target }
    }

    pub fn reversed(&self) -> Self {
        Self {
            subscriber: self.target,
            target: self.subscriber,
        }
    }
}

/// Directed block: `blocker` has blocked `blocked`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Block {
    pub blocker: UserId,
    pub blocked: UserId,
}

impl Block {
    pub fn new(blocker: UserId, blocked: UserId) -> Self {
        Self { blocker, blocked }
    }

    pub fn reversed(&self) -> Self {
        Self {
            blocker: self.blocked,
            blocked: self.blocker,
        }
    }

    /// The party on the other side of `id`, if `id` takes part in this block.
    pub fn counterpart(&self, id: UserId) -> Option<UserId> {
        if self.blocker == id {
            Some(self.blocked)
        } else if self.blocked == id {
            Some(self.blocker)
        } else {
            None
        }
    }
}

/// Sort users by email ascending, the deterministic output order of every
/// list-returning operation.
pub fn sort_by_email(users: &mut [User]) {
    users.sort_by(|a, b| a.email.cmp(&b.email));
}
