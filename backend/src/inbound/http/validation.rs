//! Shared validation helpers for inbound HTTP adapters.
//!
//! Request bodies arrive as plain strings and are converted into domain
//! values here, before any port is called. Failures become
//! `invalid_request` errors whose details name the offending field.

use serde_json::json;

use crate::domain::{
    AccountType, Bio, Error, ProgramId, SessionToken, SessionTokenValidationError, UserId,
    UserValidationError,
};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidUserId,
    BioTooLong,
    InvalidUuid,
    UnknownAccountType,
    InvalidToken,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidUserId => "invalid_user_id",
            ErrorCode::BioTooLong => "bio_too_long",
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::UnknownAccountType => "unknown_account_type",
            ErrorCode::InvalidToken => "invalid_token",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

fn field_error(field: FieldName, code: ErrorCode, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

fn field_error_with_value(
    field: FieldName,
    code: ErrorCode,
    message: impl Into<String>,
    value: &str,
) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "value": value,
        "code": code.as_str(),
    }))
}

pub(crate) fn parse_user_id(value: String, field: FieldName) -> Result<UserId, Error> {
    UserId::new(value).map_err(|err| field_error(field, ErrorCode::InvalidUserId, err.to_string()))
}

/// Bio length is checked here so oversize input never reaches persistence.
pub(crate) fn parse_bio(value: String, field: FieldName) -> Result<Bio, Error> {
    Bio::new(value).map_err(|err| field_error(field, ErrorCode::BioTooLong, err.to_string()))
}

pub(crate) fn parse_program_id(value: &str, field: FieldName) -> Result<ProgramId, Error> {
    value.parse().map_err(|_: UserValidationError| {
        field_error_with_value(
            field,
            ErrorCode::InvalidUuid,
            format!("{} must be a valid UUID", field.as_str()),
            value,
        )
    })
}

pub(crate) fn parse_account_type(value: &str, field: FieldName) -> Result<AccountType, Error> {
    value.parse().map_err(|err: UserValidationError| {
        field_error_with_value(field, ErrorCode::UnknownAccountType, err.to_string(), value)
    })
}

pub(crate) fn parse_session_token(value: &str, field: FieldName) -> Result<SessionToken, Error> {
    SessionToken::new(value).map_err(|err: SessionTokenValidationError| {
        field_error(field, ErrorCode::InvalidToken, err.to_string())
    })
}
