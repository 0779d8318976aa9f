//! Follow relationships and the notifications they produce.
//!
//! An edge is stored twice: once in the followers index keyed by the followee
//! and once in the followees index keyed by the follower side, so both
//! directions are single-table lookups. Adapters persist the pair together.

use serde::{Deserialize, Serialize};

use crate::domain::UserId;

/// Directed relationship: `follower` follows `followee`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowEdge {
    /// User who follows.
    pub follower: UserId,
    /// User being followed.
    pub followee: UserId,
}

impl FollowEdge {
    /// Build the edge created when `actor` follows `target`.
    pub fn new(actor: UserId, target: UserId) -> Self {
        Self {
            follower: actor,
            followee: target,
        }
    }

    /// Self-follows are stored but never notify.
    pub fn is_self_follow(&self) -> bool {
        self.follower == self.followee
    }
}

/// Category of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// Someone followed the recipient.
    Follow,
}

impl NotificationKind {
    /// Stable storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Follow => "follow",
        }
    }
}

/// Notification appended to the recipient's inbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNotification {
    /// Recipient.
    pub to: UserId,
    /// User whose action produced the notification.
    pub from: UserId,
    /// What happened.
    pub kind: NotificationKind,
    /// Path segment the client links to; for follows, the follower's username.
    pub link: String,
}

impl NewNotification {
    /// Follow notification addressed to the followee.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{FollowEdge, NewNotification, NotificationKind, UserId};
    ///
    /// let edge = FollowEdge::new(
    ///     UserId::new("user_a").expect("id"),
    ///     UserId::new("user_b").expect("id"),
    /// );
    /// let note = NewNotification::follow(&edge, "alice");
    /// assert_eq!(note.to.as_ref(), "user_b");
    /// assert_eq!(note.kind, NotificationKind::Follow);
    /// ```
    pub fn follow(edge: &FollowEdge, link: impl Into<String>) -> Self {
        Self {
            to: edge.followee.clone(),
            from: edge.follower.clone(),
            kind: NotificationKind::Follow,
            link: link.into(),
        }
    }
}

/// Rows removed by an unfollow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FollowRemoval {
    /// Rows deleted from the followers index.
    pub followers_rows: usize,
    /// Rows deleted from the followees index.
    pub followees_rows: usize,
    /// Follow notifications deleted.
    pub notifications: usize,
}

impl FollowRemoval {
    /// True when nothing matched.
    pub fn is_noop(&self) -> bool {
        self.followers_rows == 0 && self.followees_rows == 0 && self.notifications == 0
    }
}
