//! Account API handlers.
//!
//! ```text
//! POST /api/v1/users/sign-up {"userId":"user_2abc","programId":"<uuid>","type":"student"}
//! PUT /api/v1/users/me/bio {"bio":"Hello"}
//! GET /api/v1/users/{id}
//! POST /api/v1/users/username-exists {"username":"juan"}
//! ```

use actix_web::{HttpResponse, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ports::SignUpRequest as SignUpCommand;
use crate::domain::{AccountType, Error, User, UsernameStatus};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_account_type, parse_bio, parse_program_id, parse_user_id,
};

/// Sign-up request body for `POST /api/v1/users/sign-up`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    /// Id of the user being registered; must match the session user.
    #[schema(example = "user_2abcDEF")]
    pub user_id: String,
    /// Program the user belongs to.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub program_id: String,
    /// One of `student`, `alumni` or `faculty`.
    #[serde(rename = "type")]
    #[schema(example = "student")]
    pub account_type: String,
}

/// Sign-up result.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignUpResponse {
    /// Sequential member number assigned at sign-up.
    pub user_number: i64,
}

/// Bio update body for `PUT /api/v1/users/me/bio`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBioRequest {
    /// New bio; may be empty.
    #[schema(max_length = 128)]
    pub bio: String,
}

/// Username availability body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UsernameExistsRequest {
    /// Candidate handle. Any string is accepted.
    pub username: String,
}

/// Username availability result. `exists` is true for taken and reserved
/// handles; malformed handles report `invalid` and do not exist.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UsernameExistsResponse {
    /// True for taken and reserved handles.
    pub exists: bool,
    /// Detailed availability.
    pub status: UsernameStatus,
}

/// Stored account as returned to clients.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// Provider-issued user id.
    pub id: String,
    /// Program chosen at sign-up.
    pub program_id: Uuid,
    /// Account kind.
    pub account_type: AccountType,
    /// Profile bio, absent until first set.
    pub bio: Option<String>,
    /// Sequential member number.
    pub user_number: i64,
    /// Sign-up time.
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.into(),
            program_id: *user.program_id.as_uuid(),
            account_type: user.account_type,
            bio: user.bio.map(String::from),
            user_number: user.user_number,
            created_at: user.created_at,
        }
    }
}

/// Register the session user.
#[utoipa::path(
    post,
    path = "/api/v1/users/sign-up",
    request_body = SignUpRequest,
    responses(
        (status = 201, description = "Account created", body = SignUpResponse),
        (status = 400, description = "Invalid request or unknown program", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Signing up another user", body = Error),
        (status = 409, description = "Already signed up", body = Error)
    ),
    tags = ["users"],
    operation_id = "signUp"
)]
#[post("/users/sign-up")]
pub async fn sign_up(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SignUpRequest>,
) -> ApiResult<HttpResponse> {
    let caller = session.require_user_id()?;
    let SignUpRequest {
        user_id,
        program_id,
        account_type,
    } = payload.into_inner();
    let command = SignUpCommand {
        caller,
        user_id: parse_user_id(user_id, FieldName::new("userId"))?,
        program_id: parse_program_id(&program_id, FieldName::new("programId"))?,
        account_type: parse_account_type(&account_type, FieldName::new("type"))?,
    };
    let user = state.accounts.sign_up(command).await?;
    info!(user_id = %user.id, user_number = user.user_number, "user signed up");
    Ok(HttpResponse::Created().json(SignUpResponse {
        user_number: user.user_number,
    }))
}

/// Replace the session user's bio.
#[utoipa::path(
    put,
    path = "/api/v1/users/me/bio",
    request_body = UpdateBioRequest,
    responses(
        (status = 204, description = "Bio updated"),
        (status = 400, description = "Bio must be less than 128 characters", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Caller has not signed up", body = Error)
    ),
    tags = ["users"],
    operation_id = "updateBio"
)]
#[put("/users/me/bio")]
pub async fn update_bio(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<UpdateBioRequest>,
) -> ApiResult<HttpResponse> {
    let caller = session.require_user_id()?;
    let bio = parse_bio(payload.into_inner().bio, FieldName::new("bio"))?;
    state.accounts.update_bio(&caller, bio).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Fetch a stored account.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "Account", body = UserResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["users"],
    operation_id = "getProfile"
)]
#[get("/users/{id}")]
pub async fn get_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserResponse>> {
    session.require_user_id()?;
    let user_id = parse_user_id(path.into_inner(), FieldName::new("id"))?;
    let user = state.profiles.fetch_profile(&user_id).await?;
    Ok(web::Json(user.into()))
}

/// Check whether a username is taken or reserved. Any string is accepted.
#[utoipa::path(
    post,
    path = "/api/v1/users/username-exists",
    request_body = UsernameExistsRequest,
    responses(
        (status = 200, description = "Availability", body = UsernameExistsResponse),
        (status = 503, description = "Identity provider unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "isUsernameExists",
    security([])
)]
#[post("/users/username-exists")]
pub async fn username_exists(
    state: web::Data<HttpState>,
    payload: web::Json<UsernameExistsRequest>,
) -> ApiResult<web::Json<UsernameExistsResponse>> {
    let UsernameExistsRequest { username } = payload.into_inner();
    let status = state.usernames.username_status(&username).await?;
    Ok(web::Json(UsernameExistsResponse {
        exists: status.exists(),
        status,
    }))
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod tests;
