//! Shared Diesel error classification for the repositories in this module.
//!
//! Adapters turn the classification into their port error enum; only
//! constraint violations carry adapter-specific meaning.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Coarse outcome of a failed Diesel operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DieselFailure {
    Connection(String),
    Query(String),
    UniqueViolation,
    ForeignKeyViolation,
}

/// Extract a readable message from a pool error.
pub(crate) fn pool_error_message(error: PoolError) -> String {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    }
}

/// Classify a Diesel error, logging the database detail at debug level.
///
/// Raw database messages stay in the log; callers only see generic text.
pub(crate) fn classify_diesel_error(error: DieselError, operation: &str) -> DieselFailure {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), %operation, "diesel operation failed");
        }
        _ => debug!(%error, %operation, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => DieselFailure::Query("record not found".to_owned()),
        DieselError::QueryBuilderError(_) => {
            DieselFailure::Query("database query error".to_owned())
        }
        DieselError::DatabaseError(kind, _) => match kind {
            DatabaseErrorKind::UniqueViolation => DieselFailure::UniqueViolation,
            DatabaseErrorKind::ForeignKeyViolation => DieselFailure::ForeignKeyViolation,
            DatabaseErrorKind::ClosedConnection => {
                DieselFailure::Connection("database connection error".to_owned())
            }
            _ => DieselFailure::Query("database error".to_owned()),
        },
        _ => DieselFailure::Query("database error".to_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn database_error(kind: DatabaseErrorKind) -> DieselError {
        DieselError::DatabaseError(kind, Box::new("detail".to_owned()))
    }

    #[rstest]
    #[case(database_error(DatabaseErrorKind::UniqueViolation), DieselFailure::UniqueViolation)]
    #[case(
        database_error(DatabaseErrorKind::ForeignKeyViolation),
        DieselFailure::ForeignKeyViolation
    )]
    #[case(
        database_error(DatabaseErrorKind::ClosedConnection),
        DieselFailure::Connection("database connection error".to_owned())
    )]
    #[case(DieselError::NotFound, DieselFailure::Query("record not found".to_owned()))]
    #[case(
        database_error(DatabaseErrorKind::CheckViolation),
        DieselFailure::Query("database error".to_owned())
    )]
    fn classifies_database_errors(#[case] error: DieselError, #[case] expected: DieselFailure) {
        assert_eq!(classify_diesel_error(error, "test"), expected);
    }

    #[rstest]
    fn pool_errors_keep_their_message() {
        assert_eq!(
            pool_error_message(PoolError::checkout("timed out")),
            "timed out"
        );
    }
}
