//! Driving port for follow and unfollow.

use async_trait::async_trait;

use crate::domain::{Error, UserId};

/// Mutates the follow graph on behalf of the authenticated caller.
///
/// `actor` must be the session user; inbound adapters take it from the
/// session, never from the request body.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RelationshipCommand: Send + Sync {
    /// Make `actor` follow `target`.
    ///
    /// # Errors
    ///
    /// Returns `invalid_request` with `details.code = "already_following"`
    /// when the edge already exists; nothing is written in that case.
    async fn follow(&self, actor: &UserId, target: &UserId) -> Result<(), Error>;

    /// Remove the edge from `actor` to `target`. Succeeds when there is no
    /// such edge.
    async fn unfollow(&self, actor: &UserId, target: &UserId) -> Result<(), Error>;
}
