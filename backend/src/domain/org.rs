//! Organisational hierarchy: campuses contain colleges, colleges contain
//! programs. Read-only reference data for sign-up choices and feed scoping.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// University campus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Campus {
    /// Campus id.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// URL-safe short name.
    pub slug: String,
}

/// College within a campus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct College {
    /// College id.
    pub id: Uuid,
    /// Campus hosting the college.
    pub campus_id: Uuid,
    /// Display name.
    pub name: String,
    /// URL-safe short name.
    pub slug: String,
}

/// Degree program within a college.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    /// Program id.
    pub id: Uuid,
    /// College offering the program.
    pub college_id: Uuid,
    /// Display name.
    pub name: String,
    /// URL-safe short name.
    pub slug: String,
}

/// Full hierarchy snapshot, each level ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrgHierarchy {
    /// All campuses.
    pub campuses: Vec<Campus>,
    /// All colleges.
    pub colleges: Vec<College>,
    /// All programs.
    pub programs: Vec<Program>,
}

impl OrgHierarchy {
    /// Programs offered by colleges on the given campus.
    pub fn programs_on_campus(&self, campus_id: Uuid) -> impl Iterator<Item = &Program> {
        let colleges: Vec<Uuid> = self
            .colleges
            .iter()
            .filter(|college| college.campus_id == campus_id)
            .map(|college| college.id)
            .collect();
        self.programs
            .iter()
            .filter(move |program| colleges.contains(&program.college_id))
    }
}
