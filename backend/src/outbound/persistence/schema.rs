//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Campuses, the top of the organisational hierarchy.
    campuses (id) {
        id -> Uuid,
        name -> Text,
        slug -> Varchar,
    }
}

diesel::table! {
    /// Colleges within a campus.
    colleges (id) {
        id -> Uuid,
        campus_id -> Uuid,
        name -> Text,
        slug -> Varchar,
    }
}

diesel::table! {
    /// Degree programs within a college.
    programs (id) {
        id -> Uuid,
        college_id -> Uuid,
        name -> Text,
        slug -> Varchar,
    }
}

diesel::table! {
    /// Signed-up accounts keyed by the identity provider's user id.
    users (id) {
        id -> Varchar,
        program_id -> Uuid,
        /// One of `student`, `alumni`, `faculty`.
        account_type -> Varchar,
        /// CHECK caps it at 128 code points; the application caps UTF-16 units.
        bio -> Nullable<Text>,
        /// Sign-up ordinal drawn from a sequence.
        user_number -> Int8,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Followers index: `follower_id` follows `followee_id`. Read by
    /// followee to list someone's followers.
    followers (follower_id, followee_id) {
        follower_id -> Varchar,
        followee_id -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Mirror index with swapped roles: for an actor following a target,
    /// `followee_id` holds the actor and `follower_id` the target. Read by
    /// `followee_id` to list who a user follows.
    followees (follower_id, followee_id) {
        follower_id -> Varchar,
        followee_id -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only user notifications.
    notifications (id) {
        id -> Uuid,
        to_id -> Varchar,
        from_id -> Varchar,
        #[sql_name = "type"]
        kind -> Varchar,
        link -> Text,
        read -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(colleges -> campuses (campus_id));
diesel::joinable!(programs -> colleges (college_id));
diesel::joinable!(users -> programs (program_id));

diesel::allow_tables_to_appear_in_same_query!(
    campuses,
    colleges,
    programs,
    users,
    followers,
    followees,
    notifications,
);
