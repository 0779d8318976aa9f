//! Driven port for account rows.

use async_trait::async_trait;

use crate::domain::{Bio, NewUser, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// A row already exists for this user id.
        DuplicateUser => "user has already signed up",
        /// The referenced program does not exist.
        UnknownProgram => "program does not exist",
    }
}

/// Account storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account. Storage assigns `user_number` from a sequence so
    /// concurrent sign-ups never share an ordinal.
    async fn insert(&self, user: &NewUser) -> Result<User, UserRepositoryError>;

    /// Fetch an account by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError>;

    /// Replace the bio of `id`. Returns `false` when no such account exists.
    async fn update_bio(&self, id: &UserId, bio: &Bio) -> Result<bool, UserRepositoryError>;
}
