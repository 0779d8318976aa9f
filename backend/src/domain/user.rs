//! User account model.
//!
//! Identity (who a user is and what they are called) is owned by the external
//! identity provider. This module models the account row the service keeps
//! alongside it: program affiliation, account type, bio and sign-up ordinal.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Validation errors returned by the user value constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// User id was blank.
    #[error("user id must not be empty")]
    EmptyId,
    /// User id was too long or held disallowed characters.
    #[error("user id may only contain letters, numbers, underscores or hyphens (max {max})")]
    InvalidId {
        /// Maximum id length.
        max: usize,
    },
    /// Username was blank.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Username exceeded the length limit.
    #[error("username must be at most {max} characters")]
    UsernameTooLong {
        /// Maximum username length.
        max: usize,
    },
    /// Username held disallowed characters.
    #[error("username may only contain letters, numbers, periods, underscores or hyphens")]
    UsernameInvalidCharacters,
    /// Bio exceeded the length limit.
    #[error("Bio must be less than {max} characters")]
    BioTooLong {
        /// Maximum bio length in UTF-16 code units.
        max: usize,
    },
    /// Program id was not a UUID.
    #[error("program id must be a valid UUID")]
    InvalidProgramId,
    /// Account type was not one of the known kinds.
    #[error("account type must be one of student, alumni or faculty")]
    UnknownAccountType,
}

/// Maximum length of an identity-provider user id.
pub const USER_ID_MAX: usize = 64;
/// Maximum length of a username.
pub const USERNAME_MAX: usize = 64;
/// Maximum length of a bio, counted in UTF-16 code units.
pub const BIO_MAX: usize = 128;

static USER_ID_RE: OnceLock<Regex> = OnceLock::new();
static USERNAME_RE: OnceLock<Regex> = OnceLock::new();

fn user_id_regex() -> &'static Regex {
    USER_ID_RE.get_or_init(|| {
        Regex::new("^[A-Za-z0-9_-]+$")
            .unwrap_or_else(|error| panic!("user id regex failed to compile: {error}"))
    })
}

fn username_regex() -> &'static Regex {
    USERNAME_RE.get_or_init(|| {
        Regex::new("^[A-Za-z0-9._-]+$")
            .unwrap_or_else(|error| panic!("username regex failed to compile: {error}"))
    })
}

/// Opaque user identifier issued by the identity provider (e.g. `user_2abc`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Validate and construct a [`UserId`].
    pub fn new(id: impl Into<String>) -> Result<Self, UserValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.len() > USER_ID_MAX || !user_id_regex().is_match(&id) {
            return Err(UserValidationError::InvalidId { max: USER_ID_MAX });
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Public handle registered with the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`].
    pub fn new(username: impl Into<String>) -> Result<Self, UserValidationError> {
        let username = username.into();
        if username.trim().is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        if username.chars().count() > USERNAME_MAX {
            return Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        if !username_regex().is_match(&username) {
            return Err(UserValidationError::UsernameInvalidCharacters);
        }
        Ok(Self(username))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Free-form profile text, at most [`BIO_MAX`] UTF-16 code units. May be
/// empty.
///
/// Characters outside the Basic Multilingual Plane (most emoji) count twice,
/// matching the limit web clients enforce on `string.length`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Bio(String);

impl Bio {
    /// Validate and construct a [`Bio`].
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{Bio, BIO_MAX};
    ///
    /// assert!(Bio::new("hello").is_ok());
    /// assert!(Bio::new("x".repeat(BIO_MAX + 1)).is_err());
    /// assert!(Bio::new("\u{1F600}".repeat(65)).is_err());
    /// ```
    pub fn new(bio: impl Into<String>) -> Result<Self, UserValidationError> {
        let bio = bio.into();
        if bio.encode_utf16().count() > BIO_MAX {
            return Err(UserValidationError::BioTooLong { max: BIO_MAX });
        }
        Ok(Self(bio))
    }
}

impl AsRef<str> for Bio {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<Bio> for String {
    fn from(value: Bio) -> Self {
        value.0
    }
}

impl TryFrom<String> for Bio {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Identifier of a degree program in the org hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgramId(Uuid);

impl ProgramId {
    /// Wrap an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl FromStr for ProgramId {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| UserValidationError::InvalidProgramId)
    }
}

impl fmt::Display for ProgramId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of account chosen at sign-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Currently enrolled student.
    Student,
    /// Graduate.
    Alumni,
    /// Teaching or administrative staff.
    Faculty,
}

impl AccountType {
    /// Stable storage and wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Alumni => "alumni",
            Self::Faculty => "faculty",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountType {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(Self::Student),
            "alumni" => Ok(Self::Alumni),
            "faculty" => Ok(Self::Faculty),
            _ => Err(UserValidationError::UnknownAccountType),
        }
    }
}

/// Account row created on sign-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Provider-issued id of the new user.
    pub id: UserId,
    /// Chosen program.
    pub program_id: ProgramId,
    /// Chosen account kind.
    pub account_type: AccountType,
}

/// Persisted account.
///
/// ## Invariants
/// - `user_number` is unique and assigned by storage at insert time.
/// - `bio` respects [`BIO_MAX`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Provider-issued user id.
    pub id: UserId,
    /// Program chosen at sign-up.
    pub program_id: ProgramId,
    /// Account kind.
    pub account_type: AccountType,
    /// Profile bio, absent until first set.
    pub bio: Option<Bio>,
    /// Sequential member number.
    pub user_number: i64,
    /// Sign-up time.
    pub created_at: DateTime<Utc>,
}
