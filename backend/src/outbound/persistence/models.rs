//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{
    campuses, colleges, followees, followers, notifications, programs, users,
};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: String,
    pub program_id: Uuid,
    pub account_type: String,
    pub bio: Option<String>,
    pub user_number: i64,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for sign-up. `user_number` and `created_at` come from
/// column defaults.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: &'a str,
    pub program_id: Uuid,
    pub account_type: &'a str,
}

/// Insertable row for the followers index.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = followers)]
pub(crate) struct NewFollowerRow<'a> {
    pub follower_id: &'a str,
    pub followee_id: &'a str,
}

/// Insertable row for the followees index.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = followees)]
pub(crate) struct NewFolloweeRow<'a> {
    pub follower_id: &'a str,
    pub followee_id: &'a str,
}

/// Insertable notification.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = notifications)]
pub(crate) struct NewNotificationRow<'a> {
    pub id: Uuid,
    pub to_id: &'a str,
    pub from_id: &'a str,
    pub kind: &'a str,
    pub link: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = campuses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CampusRow {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = colleges)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CollegeRow {
    pub id: Uuid,
    pub campus_id: Uuid,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = programs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProgramRow {
    pub id: Uuid,
    pub college_id: Uuid,
    pub name: String,
    pub slug: String,
}
