//! Account services: sign-up, bio edits and profile reads.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::ports::{
    AccountCommand, SignUpRequest, UserProfileQuery, UserRepository, UserRepositoryError,
};
use crate::domain::{Bio, Error, NewUser, User, UserId};

/// Account service implementing [`AccountCommand`] and [`UserProfileQuery`].
#[derive(Clone)]
pub struct AccountService<U> {
    users: Arc<U>,
}

impl<U> AccountService<U> {
    /// Create a new service backed by `users`.
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }
}

impl<U> AccountService<U>
where
    U: UserRepository,
{
    fn map_user_error(error: UserRepositoryError) -> Error {
        match error {
            UserRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("user repository unavailable: {message}"))
            }
            UserRepositoryError::Query { message } => {
                Error::internal(format!("user repository error: {message}"))
            }
            UserRepositoryError::DuplicateUser => Error::conflict("user has already signed up")
                .with_details(json!({ "code": "already_signed_up" })),
            UserRepositoryError::UnknownProgram => Error::invalid_request("unknown program")
                .with_details(json!({ "field": "programId", "code": "unknown_program" })),
        }
    }

    fn user_not_found(id: &UserId) -> Error {
        Error::not_found(format!("user {id} has not signed up"))
    }
}

#[async_trait]
impl<U> AccountCommand for AccountService<U>
where
    U: UserRepository,
{
    async fn sign_up(&self, request: SignUpRequest) -> Result<User, Error> {
        if request.user_id != request.caller {
            return Err(Error::forbidden("cannot sign up on behalf of another user"));
        }
        let new_user = NewUser {
            id: request.user_id,
            program_id: request.program_id,
            account_type: request.account_type,
        };
        self.users
            .insert(&new_user)
            .await
            .map_err(Self::map_user_error)
    }

    async fn update_bio(&self, caller: &UserId, bio: Bio) -> Result<(), Error> {
        let updated = self
            .users
            .update_bio(caller, &bio)
            .await
            .map_err(Self::map_user_error)?;
        if updated {
            Ok(())
        } else {
            Err(Self::user_not_found(caller))
        }
    }
}

#[async_trait]
impl<U> UserProfileQuery for AccountService<U>
where
    U: UserRepository,
{
    async fn fetch_profile(&self, user_id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(Self::map_user_error)?
            .ok_or_else(|| Self::user_not_found(user_id))
    }
}
