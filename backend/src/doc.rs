//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every `/api/v1` handler, the health probes, and the
//! request/response DTOs, plus the session cookie security scheme. Swagger UI
//! serves it in debug builds and `cargo run --bin openapi-dump` exports it.

use crate::domain::{AccountType, Campus, College, Error, ErrorCode, OrgHierarchy, Program, UsernameStatus};
use crate::inbound::http::auth::CreateSessionRequest;
use crate::inbound::http::relationships::{FollowRequest, IsFollowingResponse};
use crate::inbound::http::users::{
    SignUpRequest, SignUpResponse, UpdateBioRequest, UserResponse, UsernameExistsRequest,
    UsernameExistsResponse,
};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/session.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "kabsu.me backend API",
        description = "Follow graph, accounts and organisational hierarchy."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::create_session,
        crate::inbound::http::auth::delete_session,
        crate::inbound::http::relationships::follow,
        crate::inbound::http::relationships::unfollow,
        crate::inbound::http::relationships::list_followers,
        crate::inbound::http::relationships::list_followees,
        crate::inbound::http::relationships::is_following,
        crate::inbound::http::users::sign_up,
        crate::inbound::http::users::update_bio,
        crate::inbound::http::users::get_profile,
        crate::inbound::http::users::username_exists,
        crate::inbound::http::org::list_programs,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        AccountType,
        UsernameStatus,
        Campus,
        College,
        Program,
        OrgHierarchy,
        CreateSessionRequest,
        FollowRequest,
        IsFollowingResponse,
        SignUpRequest,
        SignUpResponse,
        UpdateBioRequest,
        UserResponse,
        UsernameExistsRequest,
        UsernameExistsResponse,
    )),
    tags(
        (name = "session", description = "Session establishment"),
        (name = "relationships", description = "Follow graph"),
        (name = "users", description = "Accounts and profiles"),
        (name = "org", description = "Campuses, colleges and programs"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
/// OpenAPI document for the REST API.
pub struct ApiDoc;
