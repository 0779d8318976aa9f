//! Follow graph services.
//!
//! Implements [`RelationshipCommand`] and [`RelationshipQuery`] on top of the
//! relationship repository and the identity directory. The repository writes
//! both index rows and the notification atomically; this service decides what
//! to write.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use crate::domain::identity_errors::map_identity_error;
use crate::domain::ports::{
    IdentityDirectory, RelationshipCommand, RelationshipQuery, RelationshipRepository,
    RelationshipRepositoryError,
};
use crate::domain::{Error, FollowEdge, NewNotification, NotificationKind, UserId};

/// Message returned when the edge already exists.
pub const ALREADY_FOLLOWING_MESSAGE: &str = "Already following user";

/// Relationship service implementing the follow graph driving ports.
#[derive(Clone)]
pub struct RelationshipService<R, I> {
    relationships: Arc<R>,
    identities: Arc<I>,
}

impl<R, I> RelationshipService<R, I> {
    /// Create a new service with the given repository and identity directory.
    pub fn new(relationships: Arc<R>, identities: Arc<I>) -> Self {
        Self {
            relationships,
            identities,
        }
    }
}

impl<R, I> RelationshipService<R, I>
where
    R: RelationshipRepository,
    I: IdentityDirectory,
{
    fn already_following() -> Error {
        Error::invalid_request(ALREADY_FOLLOWING_MESSAGE)
            .with_details(json!({ "code": "already_following" }))
    }

    fn map_relationship_error(error: RelationshipRepositoryError) -> Error {
        match error {
            RelationshipRepositoryError::Connection { message } => Error::service_unavailable(
                format!("relationship repository unavailable: {message}"),
            ),
            RelationshipRepositoryError::Query { message } => {
                Error::internal(format!("relationship repository error: {message}"))
            }
            RelationshipRepositoryError::DuplicateEdge => Self::already_following(),
        }
    }

    /// Link stored on the follow notification: the follower's username, or
    /// empty when the follower has none.
    async fn follower_link(&self, follower: &UserId) -> Result<String, Error> {
        let record = self
            .identities
            .find_user(follower)
            .await
            .map_err(map_identity_error)?;
        Ok(record
            .and_then(|record| record.username)
            .map(String::from)
            .unwrap_or_default())
    }
}

#[async_trait]
impl<R, I> RelationshipCommand for RelationshipService<R, I>
where
    R: RelationshipRepository,
    I: IdentityDirectory,
{
    async fn follow(&self, actor: &UserId, target: &UserId) -> Result<(), Error> {
        let edge = FollowEdge::new(actor.clone(), target.clone());
        if self
            .relationships
            .edge_exists(&edge)
            .await
            .map_err(Self::map_relationship_error)?
        {
            return Err(Self::already_following());
        }

        let notification = if edge.is_self_follow() {
            None
        } else {
            let link = self.follower_link(&edge.follower).await?;
            Some(NewNotification::follow(&edge, link))
        };

        self.relationships
            .insert_follow(&edge, notification)
            .await
            .map_err(Self::map_relationship_error)
    }

    async fn unfollow(&self, actor: &UserId, target: &UserId) -> Result<(), Error> {
        let edge = FollowEdge::new(actor.clone(), target.clone());
        let notification_kind = (!edge.is_self_follow()).then_some(NotificationKind::Follow);
        let removed = self
            .relationships
            .delete_follow(&edge, notification_kind)
            .await
            .map_err(Self::map_relationship_error)?;
        if removed.is_noop() {
            debug!(%actor, %target, "unfollow matched no edge");
        }
        Ok(())
    }
}

#[async_trait]
impl<R, I> RelationshipQuery for RelationshipService<R, I>
where
    R: RelationshipRepository,
    I: IdentityDirectory,
{
    async fn followers(&self, user: &UserId) -> Result<Vec<UserId>, Error> {
        self.relationships
            .list_followers(user)
            .await
            .map_err(Self::map_relationship_error)
    }

    async fn followees(&self, user: &UserId) -> Result<Vec<UserId>, Error> {
        self.relationships
            .list_followees(user)
            .await
            .map_err(Self::map_relationship_error)
    }

    async fn is_following(&self, actor: &UserId, target: &UserId) -> Result<bool, Error> {
        let edge = FollowEdge::new(actor.clone(), target.clone());
        self.relationships
            .edge_exists(&edge)
            .await
            .map_err(Self::map_relationship_error)
    }
}

#[cfg(test)]
#[path = "relationship_service_tests.rs"]
mod tests;
