//! Driven port for the external identity provider.
//!
//! The provider owns usernames and session validation; the service only reads
//! from it.

use async_trait::async_trait;

use crate::domain::{SessionToken, UserId, Username};

use super::define_port_error;

define_port_error! {
    /// Errors raised by identity provider adapters.
    pub enum IdentityDirectoryError {
        /// The provider could not be reached or timed out.
        Transport { message: String } => "identity provider unreachable: {message}",
        /// The provider answered with an unexpected status.
        Status { status: u16, message: String } =>
            "identity provider returned status {status}: {message}",
        /// The provider payload could not be decoded.
        Decode { message: String } => "identity provider response invalid: {message}",
    }
}

/// Identity as known to the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityRecord {
    /// Provider-issued user id.
    pub id: UserId,
    /// Users may exist without choosing a username.
    pub username: Option<Username>,
}

/// Read access to the identity provider.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityDirectory: Send + Sync {
    /// Look up a user by id. `None` when the provider does not know the id.
    async fn find_user(&self, id: &UserId)
    -> Result<Option<IdentityRecord>, IdentityDirectoryError>;

    /// Return whether any registered identity uses `username`.
    async fn username_registered(&self, username: &Username)
    -> Result<bool, IdentityDirectoryError>;

    /// Validate a provider session token. `None` when the token is not valid.
    async fn verify_session(&self, token: &SessionToken)
    -> Result<Option<UserId>, IdentityDirectoryError>;
}
