//! Driving port for account sign-up and bio edits.

use async_trait::async_trait;

use crate::domain::{AccountType, Bio, Error, ProgramId, User, UserId};

/// Request to register the caller's account row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpRequest {
    /// Authenticated session user.
    pub caller: UserId,
    /// Identity the account is created for; must equal `caller`.
    pub user_id: UserId,
    /// Program the account signs up under.
    pub program_id: ProgramId,
    /// Kind of account being created.
    pub account_type: AccountType,
}

/// Account lifecycle operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountCommand: Send + Sync {
    /// Create the account and assign its sign-up ordinal.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `user_id` differs from `caller` (forbidden).
    /// - The program does not exist (invalid request).
    /// - The account already exists (conflict).
    async fn sign_up(&self, request: SignUpRequest) -> Result<User, Error>;

    /// Replace the caller's bio. Returns `not_found` when the caller has not
    /// signed up.
    async fn update_bio(&self, caller: &UserId, bio: Bio) -> Result<(), Error>;
}
