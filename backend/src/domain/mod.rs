//! Domain primitives, ports and services.
//!
//! Purpose: Define strongly typed entities used by the API and persistence
//! layers, plus the use-case services that sit between them. Types validate
//! on construction so adapters never hold an unchecked id, handle or bio.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - User, UserId, Username, Bio: account identity and profile values.
//! - FollowEdge, NewNotification: follow graph writes.
//! - RelationshipService, AccountService, UsernameService,
//!   IdentitySessionAuthenticator: driving port implementations.

pub mod account_service;
pub mod auth;
pub mod error;
mod identity_errors;
pub mod org;
pub mod ports;
pub mod relationship;
pub mod relationship_service;
pub mod session_service;
pub mod trace_id;
pub mod user;
pub mod username;
pub mod username_service;

pub use self::account_service::AccountService;
pub use self::auth::{SessionToken, SessionTokenValidationError};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::org::{Campus, College, OrgHierarchy, Program};
pub use self::relationship::{FollowEdge, FollowRemoval, NewNotification, NotificationKind};
pub use self::relationship_service::{ALREADY_FOLLOWING_MESSAGE, RelationshipService};
pub use self::session_service::IdentitySessionAuthenticator;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    AccountType, BIO_MAX, Bio, NewUser, ProgramId, USER_ID_MAX, USERNAME_MAX, User, UserId,
    UserValidationError, Username,
};
pub use self::username::{DEFAULT_RESERVED_USERNAMES, ReservedUsernames, UsernameStatus};
pub use self::username_service::UsernameService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
