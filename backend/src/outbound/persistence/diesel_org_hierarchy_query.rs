//! PostgreSQL-backed `OrgHierarchyQuery` adapter.
//!
//! The hierarchy is small reference data, so every level is loaded in full.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::AsyncConnection as _;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt as _;

use crate::domain::ports::OrgHierarchyQuery;
use crate::domain::{Campus, College, Error, OrgHierarchy, Program};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error, pool_error_message};
use super::models::{CampusRow, CollegeRow, ProgramRow};
use super::pool::DbPool;
use super::schema::{campuses, colleges, programs};

/// Diesel-backed organisational hierarchy reader.
#[derive(Clone)]
pub struct DieselOrgHierarchyQuery {
    pool: DbPool,
}

impl DieselOrgHierarchyQuery {
    /// Create a new query adapter with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> Error {
    match classify_diesel_error(error, "org hierarchy read") {
        DieselFailure::Connection(message) => Error::service_unavailable(message),
        _ => Error::internal("failed to load organisational hierarchy"),
    }
}

#[async_trait]
impl OrgHierarchyQuery for DieselOrgHierarchyQuery {
    async fn hierarchy(&self) -> Result<OrgHierarchy, Error> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| Error::service_unavailable(pool_error_message(err)))?;

        // One snapshot so a program never references a college that is
        // missing from the same response.
        let (campus_rows, college_rows, program_rows) = conn
            .transaction(|conn| {
                async move {
                    let campus_rows: Vec<CampusRow> = campuses::table
                        .select(CampusRow::as_select())
                        .order_by(campuses::name)
                        .load(conn)
                        .await?;
                    let college_rows: Vec<CollegeRow> = colleges::table
                        .select(CollegeRow::as_select())
                        .order_by(colleges::name)
                        .load(conn)
                        .await?;
                    let program_rows: Vec<ProgramRow> = programs::table
                        .select(ProgramRow::as_select())
                        .order_by(programs::name)
                        .load(conn)
                        .await?;
                    Ok::<_, diesel::result::Error>((campus_rows, college_rows, program_rows))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        Ok(OrgHierarchy {
            campuses: campus_rows.into_iter().map(Campus::from).collect(),
            colleges: college_rows.into_iter().map(College::from).collect(),
            programs: program_rows.into_iter().map(Program::from).collect(),
        })
    }
}

impl From<CampusRow> for Campus {
    fn from(row: CampusRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            slug: row.slug,
        }
    }
}

impl From<CollegeRow> for College {
    fn from(row: CollegeRow) -> Self {
        Self {
            id: row.id,
            campus_id: row.campus_id,
            name: row.name,
            slug: row.slug,
        }
    }
}

impl From<ProgramRow> for Program {
    fn from(row: ProgramRow) -> Self {
        Self {
            id: row.id,
            college_id: row.college_id,
            name: row.name,
            slug: row.slug,
        }
    }
}
