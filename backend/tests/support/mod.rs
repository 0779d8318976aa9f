//! Shared helper utilities for backend integration tests.
//!
//! Integration tests compile as separate crates under `backend/tests/`, so
//! the embedded PostgreSQL suites share their seeding and skip policy here.

use postgres::{Client, NoTls};
use uuid::Uuid;

mod cluster_skip;

pub use cluster_skip::handle_cluster_setup_failure;

/// Render a `postgres` error with the SQLSTATE and detail when available.
///
/// `postgres::Error` displays database failures as a bare `db error`, which
/// is useless in CI logs.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };

    let mut summary = format!(
        "postgres error {:?}: {}",
        db_error.code(),
        db_error.message()
    );
    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }
    summary
}

/// Open a blocking client for direct row inspection.
pub fn connect(url: &str) -> Result<Client, String> {
    Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))
}

/// Create an empty database named `name` through the maintenance database.
pub fn create_database(maintenance_url: &str, name: &str) -> Result<(), String> {
    let mut client = connect(maintenance_url)?;
    client
        .batch_execute(&format!(
            "DROP DATABASE IF EXISTS \"{name}\"; CREATE DATABASE \"{name}\";"
        ))
        .map_err(|err| format_postgres_error(&err))
}

/// Insert one campus, college and program, returning the program id.
pub fn seed_program(url: &str) -> Result<Uuid, String> {
    let mut client = connect(url)?;
    let campus_id = Uuid::new_v4();
    let college_id = Uuid::new_v4();
    let program_id = Uuid::new_v4();
    client
        .execute(
            "INSERT INTO campuses (id, name, slug) VALUES ($1, 'Main Campus', 'main')",
            &[&campus_id],
        )
        .map_err(|err| format_postgres_error(&err))?;
    client
        .execute(
            "INSERT INTO colleges (id, campus_id, name, slug) \
             VALUES ($1, $2, 'College of Engineering', 'ceit')",
            &[&college_id, &campus_id],
        )
        .map_err(|err| format_postgres_error(&err))?;
    client
        .execute(
            "INSERT INTO programs (id, college_id, name, slug) \
             VALUES ($1, $2, 'Computer Science', 'bscs')",
            &[&program_id, &college_id],
        )
        .map_err(|err| format_postgres_error(&err))?;
    Ok(program_id)
}
