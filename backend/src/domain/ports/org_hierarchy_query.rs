//! Driving port for the campus, college and program catalogue.
//!
//! The catalogue is public; sign-up forms load it before a user has an
//! account.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Campus, College, Error, OrgHierarchy, Program};

/// Domain use-case port for reading the organisational hierarchy.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrgHierarchyQuery: Send + Sync {
    /// Return every campus, college and program.
    async fn hierarchy(&self) -> Result<OrgHierarchy, Error>;
}

/// Fixture hierarchy with a single campus, college and program.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureOrgHierarchyQuery;

impl FixtureOrgHierarchyQuery {
    /// Id of the fixture campus.
    pub const CAMPUS_ID: Uuid = Uuid::from_u128(0x5a1d_0000_0000_4000_8000_0000_0000_0001);
    /// Id of the fixture college.
    pub const COLLEGE_ID: Uuid = Uuid::from_u128(0x5a1d_0000_0000_4000_8000_0000_0000_0002);
    /// Id of the fixture program.
    pub const PROGRAM_ID: Uuid = Uuid::from_u128(0x5a1d_0000_0000_4000_8000_0000_0000_0003);
}

#[async_trait]
impl OrgHierarchyQuery for FixtureOrgHierarchyQuery {
    async fn hierarchy(&self) -> Result<OrgHierarchy, Error> {
        Ok(OrgHierarchy {
            campuses: vec![Campus {
                id: Self::CAMPUS_ID,
                name: "Main Campus".to_owned(),
                slug: "main".to_owned(),
            }],
            colleges: vec![College {
                id: Self::COLLEGE_ID,
                campus_id: Self::CAMPUS_ID,
                name: "College of Engineering and Information Technology".to_owned(),
                slug: "ceit".to_owned(),
            }],
            programs: vec![Program {
                id: Self::PROGRAM_ID,
                college_id: Self::COLLEGE_ID,
                name: "BS Information Technology".to_owned(),
                slug: "bsit".to_owned(),
            }],
        })
    }
}
