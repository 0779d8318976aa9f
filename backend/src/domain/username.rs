//! Username availability.
//!
//! Some handles collide with application routes or impersonate staff, so they
//! are reserved even though no identity owns them. Reserved entries match
//! exactly as written; `Admin` is not the same handle as `admin`.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Handles that can never be registered.
pub const DEFAULT_RESERVED_USERNAMES: &[&str] = &[
    "about",
    "admin",
    "administrator",
    "api",
    "auth",
    "contact",
    "feedback",
    "help",
    "kabsu",
    "login",
    "logout",
    "me",
    "messages",
    "moderator",
    "ngl",
    "notifications",
    "privacy",
    "root",
    "search",
    "settings",
    "sign-in",
    "sign-out",
    "sign-up",
    "support",
    "terms",
    "www",
];

/// Outcome of a username lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum UsernameStatus {
    /// Nobody owns the handle and it is not reserved.
    Available,
    /// A registered identity already uses the handle.
    Taken,
    /// The handle is on the reserved list.
    Reserved,
    /// The handle is malformed and can never be registered.
    Invalid,
}

impl UsernameStatus {
    /// Collapse to the legacy boolean: reserved handles count as existing.
    #[must_use]
    pub const fn exists(self) -> bool {
        matches!(self, Self::Taken | Self::Reserved)
    }
}

/// Set of reserved handles, compared exactly.
#[derive(Debug, Clone)]
pub struct ReservedUsernames(HashSet<String>);

impl ReservedUsernames {
    /// Build a set from arbitrary handles.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            names
                .into_iter()
                .map(|name| name.as_ref().trim().to_owned())
                .filter(|name| !name.is_empty())
                .collect(),
        )
    }

    /// Default list extended with operator-configured handles.
    pub fn with_extra<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::default();
        set.0.extend(
            extra
                .into_iter()
                .map(|name| name.as_ref().trim().to_owned())
                .filter(|name| !name.is_empty()),
        );
        set
    }

    /// True when `candidate` is reserved exactly as written.
    #[must_use]
    pub fn contains(&self, candidate: &str) -> bool {
        self.0.contains(candidate)
    }
}

impl Default for ReservedUsernames {
    fn default() -> Self {
        Self::new(DEFAULT_RESERVED_USERNAMES.iter().copied())
    }
}
