//! Session establishment backed by the identity provider.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::identity_errors::map_identity_error;
use crate::domain::ports::{IdentityDirectory, SessionAuthenticator};
use crate::domain::{Error, SessionToken, UserId};

/// Authenticator that asks the identity provider to verify tokens.
#[derive(Clone)]
pub struct IdentitySessionAuthenticator<I> {
    identities: Arc<I>,
}

impl<I> IdentitySessionAuthenticator<I> {
    /// Create an authenticator over `identities`.
    pub fn new(identities: Arc<I>) -> Self {
        Self { identities }
    }
}

#[async_trait]
impl<I> SessionAuthenticator for IdentitySessionAuthenticator<I>
where
    I: IdentityDirectory,
{
    async fn authenticate(&self, token: &SessionToken) -> Result<UserId, Error> {
        self.identities
            .verify_session(token)
            .await
            .map_err(map_identity_error)?
            .ok_or_else(|| Error::unauthorized("invalid session token"))
    }
}
