//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use std::str::FromStr;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{AccountType, Bio, NewUser, ProgramId, User, UserId};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error, pool_error_message};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserRepositoryError {
    UserRepositoryError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error, operation: &str) -> UserRepositoryError {
    match classify_diesel_error(error, operation) {
        DieselFailure::UniqueViolation => UserRepositoryError::duplicate_user(),
        // The only foreign key on `users` points at `programs`.
        DieselFailure::ForeignKeyViolation => UserRepositoryError::unknown_program(),
        DieselFailure::Connection(message) => UserRepositoryError::connection(message),
        DieselFailure::Query(message) => UserRepositoryError::query(message),
    }
}

fn row_to_user(row: UserRow) -> Result<User, UserRepositoryError> {
    let corrupt = |err: crate::domain::UserValidationError| {
        UserRepositoryError::query(format!("stored user row is invalid: {err}"))
    };
    Ok(User {
        id: UserId::new(row.id).map_err(corrupt)?,
        program_id: ProgramId::from_uuid(row.program_id),
        account_type: AccountType::from_str(&row.account_type).map_err(corrupt)?,
        bio: row.bio.map(Bio::new).transpose().map_err(corrupt)?,
        user_number: row.user_number,
        created_at: row.created_at,
    })
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: &NewUser) -> Result<User, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewUserRow {
            id: user.id.as_ref(),
            program_id: *user.program_id.as_uuid(),
            account_type: user.account_type.as_str(),
        };

        let row: UserRow = diesel::insert_into(users::table)
            .values(&new_row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "user insert"))?;
        row_to_user(row)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::id.eq(id.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "user lookup"))?;
        row.map(row_to_user).transpose()
    }

    async fn update_bio(&self, id: &UserId, bio: &Bio) -> Result<bool, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let updated = diesel::update(users::table.filter(users::id.eq(id.as_ref())))
            .set(users::bio.eq(bio.as_ref()))
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "bio update"))?;
        Ok(updated > 0)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for user row mapping.
    use super::*;
    use chrono::Utc;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;
    use uuid::Uuid;

    fn row(account_type: &str, bio: Option<&str>) -> UserRow {
        UserRow {
            id: "user_a".to_owned(),
            program_id: Uuid::nil(),
            account_type: account_type.to_owned(),
            bio: bio.map(str::to_owned),
            user_number: 7,
            created_at: Utc::now(),
        }
    }

    #[rstest]
    #[case(DatabaseErrorKind::UniqueViolation, UserRepositoryError::DuplicateUser)]
    #[case(DatabaseErrorKind::ForeignKeyViolation, UserRepositoryError::UnknownProgram)]
    fn constraint_violations_have_meaning(
        #[case] kind: DatabaseErrorKind,
        #[case] expected: UserRepositoryError,
    ) {
        let diesel_err = DieselError::DatabaseError(kind, Box::new("constraint".to_string()));
        assert_eq!(map_diesel_error(diesel_err, "user insert"), expected);
    }

    #[rstest]
    fn valid_row_converts() {
        let user = row_to_user(row("alumni", Some("hello"))).expect("valid row");
        assert_eq!(user.account_type, AccountType::Alumni);
        assert_eq!(user.bio.as_ref().map(AsRef::as_ref), Some("hello"));
        assert_eq!(user.user_number, 7);
    }

    #[rstest]
    fn unknown_account_type_is_a_query_error() {
        let err = row_to_user(row("visitor", None)).expect_err("bad account type");
        assert!(matches!(err, UserRepositoryError::Query { .. }));
    }
}
