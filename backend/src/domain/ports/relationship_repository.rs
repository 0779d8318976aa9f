//! Driven port for the follow-relationship index and its notifications.

use async_trait::async_trait;

use crate::domain::{FollowEdge, FollowRemoval, NewNotification, NotificationKind, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by relationship repository adapters.
    pub enum RelationshipRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "relationship repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "relationship repository query failed: {message}",
        /// The edge already exists; raised by the storage uniqueness constraint.
        DuplicateEdge => "follow edge already exists",
    }
}

/// Storage for follow edges, both index directions, and follow notifications.
///
/// # Consistency
///
/// [`RelationshipRepository::insert_follow`] and
/// [`RelationshipRepository::delete_follow`] are atomic: either both index rows
/// (and the notification, when given) change, or none do. At most one edge may
/// exist per `(follower, followee)`; a second insert fails with
/// [`RelationshipRepositoryError::DuplicateEdge`] even when two callers race
/// past [`RelationshipRepository::edge_exists`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RelationshipRepository: Send + Sync {
    /// Return whether `edge` is recorded in the followers index.
    async fn edge_exists(&self, edge: &FollowEdge) -> Result<bool, RelationshipRepositoryError>;

    /// Write both index rows for `edge`, plus `notification` when present.
    async fn insert_follow(
        &self,
        edge: &FollowEdge,
        notification: Option<NewNotification>,
    ) -> Result<(), RelationshipRepositoryError>;

    /// Remove both index rows for `edge`.
    ///
    /// When `notification_kind` is set, every notification of that kind from
    /// the follower to the followee is removed too. Missing rows are not an
    /// error.
    async fn delete_follow(
        &self,
        edge: &FollowEdge,
        notification_kind: Option<NotificationKind>,
    ) -> Result<FollowRemoval, RelationshipRepositoryError>;

    /// Users following `user`, oldest edge first.
    async fn list_followers(&self, user: &UserId)
    -> Result<Vec<UserId>, RelationshipRepositoryError>;

    /// Users that `user` follows, oldest edge first.
    async fn list_followees(&self, user: &UserId)
    -> Result<Vec<UserId>, RelationshipRepositoryError>;
}
