//! Driving port for exchanging provider tokens for a local session.

use async_trait::async_trait;

use crate::domain::{Error, SessionToken, UserId};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionAuthenticator: Send + Sync {
    /// Validate `token` and return the user it belongs to.
    ///
    /// # Errors
    ///
    /// Returns `unauthorized` when the provider rejects the token.
    async fn authenticate(&self, token: &SessionToken) -> Result<UserId, Error>;
}
