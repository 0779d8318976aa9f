//! Organisational hierarchy handler.
//!
//! ```text
//! GET /api/v1/programs
//! GET /api/v1/programs?campusId=<uuid>
//! ```

use actix_web::{get, web};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::domain::{Error, OrgHierarchy};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Optional narrowing of the hierarchy to one campus.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ProgramsQuery {
    /// Only return programs offered on this campus.
    pub campus_id: Option<Uuid>,
}

fn restrict_to_campus(hierarchy: OrgHierarchy, campus_id: Uuid) -> OrgHierarchy {
    let programs = hierarchy
        .programs_on_campus(campus_id)
        .cloned()
        .collect();
    OrgHierarchy {
        campuses: hierarchy
            .campuses
            .into_iter()
            .filter(|campus| campus.id == campus_id)
            .collect(),
        colleges: hierarchy
            .colleges
            .into_iter()
            .filter(|college| college.campus_id == campus_id)
            .collect(),
        programs,
    }
}

/// Campuses, colleges and programs offered at sign-up.
#[utoipa::path(
    get,
    path = "/api/v1/programs",
    params(ProgramsQuery),
    responses(
        (status = 200, description = "Organisational hierarchy", body = OrgHierarchy),
        (status = 503, description = "Database unavailable", body = Error)
    ),
    tags = ["org"],
    operation_id = "getProgramForAuth",
    security([])
)]
#[get("/programs")]
pub async fn list_programs(
    state: web::Data<HttpState>,
    query: web::Query<ProgramsQuery>,
) -> ApiResult<web::Json<OrgHierarchy>> {
    let hierarchy = state.org.hierarchy().await?;
    Ok(web::Json(match query.campus_id {
        Some(campus_id) => restrict_to_campus(hierarchy, campus_id),
        None => hierarchy,
    }))
}
