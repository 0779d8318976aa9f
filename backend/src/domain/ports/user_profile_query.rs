//! Driving port for user profile queries.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Domain use-case port for reading a stored account.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserProfileQuery: Send + Sync {
    /// Return the account for `user_id`, or `not_found`.
    async fn fetch_profile(&self, user_id: &UserId) -> Result<User, Error>;
}
