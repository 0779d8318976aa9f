//! Driving port for reading the follow graph.

use async_trait::async_trait;

use crate::domain::{Error, UserId};

/// Read side of the follow graph.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RelationshipQuery: Send + Sync {
    /// Users following `user`.
    async fn followers(&self, user: &UserId) -> Result<Vec<UserId>, Error>;

    /// Users `user` follows.
    async fn followees(&self, user: &UserId) -> Result<Vec<UserId>, Error>;

    /// Whether `actor` follows `target`.
    async fn is_following(&self, actor: &UserId, target: &UserId) -> Result<bool, Error>;
}
