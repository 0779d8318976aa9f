//! Follow graph API handlers.
//!
//! ```text
//! POST /api/v1/users/follow {"userId":"user_2abc"}
//! POST /api/v1/users/unfollow {"userId":"user_2abc"}
//! GET /api/v1/users/{id}/followers
//! GET /api/v1/users/{id}/followees
//! GET /api/v1/users/{id}/is-following
//! ```
//!
//! The acting user always comes from the session cookie.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::domain::{Error, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_user_id};

const USER_ID_FIELD: FieldName = FieldName::new("userId");
const PATH_ID_FIELD: FieldName = FieldName::new("id");

/// Body for follow and unfollow: the user being (un)followed.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FollowRequest {
    /// User to follow or unfollow.
    #[schema(example = "user_2abcDEF")]
    pub user_id: String,
}

/// Response for `GET /api/v1/users/{id}/is-following`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IsFollowingResponse {
    /// Whether the session user follows the path user.
    pub following: bool,
}

/// Follow another user.
#[utoipa::path(
    post,
    path = "/api/v1/users/follow",
    request_body = FollowRequest,
    responses(
        (status = 204, description = "Now following"),
        (status = 400, description = "Invalid request or already following", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 503, description = "Dependency unavailable", body = Error)
    ),
    tags = ["relationships"],
    operation_id = "follow"
)]
#[post("/users/follow")]
pub async fn follow(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<FollowRequest>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user_id()?;
    let target = parse_user_id(payload.into_inner().user_id, USER_ID_FIELD)?;
    state.relationships.follow(&actor, &target).await?;
    info!(follower = %actor, followee = %target, "follow recorded");
    Ok(HttpResponse::NoContent().finish())
}

/// Stop following a user. Succeeds when no edge exists.
#[utoipa::path(
    post,
    path = "/api/v1/users/unfollow",
    request_body = FollowRequest,
    responses(
        (status = 204, description = "No longer following"),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 503, description = "Dependency unavailable", body = Error)
    ),
    tags = ["relationships"],
    operation_id = "unfollow"
)]
#[post("/users/unfollow")]
pub async fn unfollow(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<FollowRequest>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user_id()?;
    let target = parse_user_id(payload.into_inner().user_id, USER_ID_FIELD)?;
    state.relationships.unfollow(&actor, &target).await?;
    info!(follower = %actor, followee = %target, "follow removed");
    Ok(HttpResponse::NoContent().finish())
}

/// Users following `{id}`.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}/followers",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "Follower ids", body = [String]),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["relationships"],
    operation_id = "listFollowers"
)]
#[get("/users/{id}/followers")]
pub async fn list_followers(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<UserId>>> {
    session.require_user_id()?;
    let user = parse_user_id(path.into_inner(), PATH_ID_FIELD)?;
    Ok(web::Json(state.relationships_query.followers(&user).await?))
}

/// Users `{id}` follows.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}/followees",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "Followee ids", body = [String]),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["relationships"],
    operation_id = "listFollowees"
)]
#[get("/users/{id}/followees")]
pub async fn list_followees(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<UserId>>> {
    session.require_user_id()?;
    let user = parse_user_id(path.into_inner(), PATH_ID_FIELD)?;
    Ok(web::Json(state.relationships_query.followees(&user).await?))
}

/// Whether the session user follows `{id}`.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}/is-following",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "Follow state", body = IsFollowingResponse),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["relationships"],
    operation_id = "isFollowing"
)]
#[get("/users/{id}/is-following")]
pub async fn is_following(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<IsFollowingResponse>> {
    let actor = session.require_user_id()?;
    let target = parse_user_id(path.into_inner(), PATH_ID_FIELD)?;
    let following = state
        .relationships_query
        .is_following(&actor, &target)
        .await?;
    Ok(web::Json(IsFollowingResponse { following }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use mockall::predicate::eq;
    use serde_json::{Value, json};

    use crate::inbound::http::test_utils::{
        MockPorts, login_request, session_cookie, test_login_resource, test_session_middleware,
    };

    fn id(raw: &str) -> UserId {
        UserId::new(raw).expect("valid id")
    }

    fn test_app(
        ports: MockPorts,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(ports.into_state()))
            .wrap(test_session_middleware())
            .service(test_login_resource())
            .service(
                web::scope("/api/v1")
                    .service(follow)
                    .service(unfollow)
                    .service(list_followers)
                    .service(list_followees)
                    .service(is_following),
            )
    }

    #[actix_web::test]
    async fn follow_uses_session_user_as_actor() {
        let mut ports = MockPorts::default();
        ports
            .relationships
            .expect_follow()
            .with(eq(id("user_a")), eq(id("user_b")))
            .times(1)
            .return_once(|_, _| Ok(()));
        let app = actix_test::init_service(test_app(ports)).await;
        let login = actix_test::call_service(&app, login_request("user_a").to_request()).await;
        let cookie = session_cookie(&login);

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/users/follow")
                .cookie(cookie)
                .set_json(json!({"userId": "user_b"}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
    }

    #[actix_web::test]
    async fn follow_requires_session() {
        let mut ports = MockPorts::default();
        ports.relationships.expect_follow().never();
        let app = actix_test::init_service(test_app(ports)).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/users/follow")
                .set_json(json!({"userId": "user_b"}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn duplicate_follow_is_bad_request() {
        let mut ports = MockPorts::default();
        ports.relationships.expect_follow().return_once(|_, _| {
            Err(Error::invalid_request("Already following user")
                .with_details(json!({"code": "already_following"})))
        });
        let app = actix_test::init_service(test_app(ports)).await;
        let login = actix_test::call_service(&app, login_request("user_a").to_request()).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/users/follow")
                .cookie(session_cookie(&login))
                .set_json(json!({"userId": "user_b"}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["message"], "Already following user");
        assert_eq!(body["details"]["code"], "already_following");
    }

    #[actix_web::test]
    async fn unfollow_rejects_blank_target_before_calling_port() {
        let mut ports = MockPorts::default();
        ports.relationships.expect_unfollow().never();
        let app = actix_test::init_service(test_app(ports)).await;
        let login = actix_test::call_service(&app, login_request("user_a").to_request()).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/users/unfollow")
                .cookie(session_cookie(&login))
                .set_json(json!({"userId": " "}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["details"]["field"], "userId");
    }

    #[actix_web::test]
    async fn lists_and_follow_state_are_served() {
        let mut ports = MockPorts::default();
        ports
            .relationships_query
            .expect_followers()
            .with(eq(id("user_b")))
            .return_once(|_| Ok(vec![UserId::new("user_a").expect("id")]));
        ports
            .relationships_query
            .expect_is_following()
            .with(eq(id("user_a")), eq(id("user_b")))
            .return_once(|_, _| Ok(true));
        let app = actix_test::init_service(test_app(ports)).await;
        let login = actix_test::call_service(&app, login_request("user_a").to_request()).await;
        let cookie = session_cookie(&login);

        let followers: Value = actix_test::call_and_read_body_json(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/users/user_b/followers")
                .cookie(cookie.clone())
                .to_request(),
        )
        .await;
        assert_eq!(followers, json!(["user_a"]));

        let state: Value = actix_test::call_and_read_body_json(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/users/user_b/is-following")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(state, json!({"following": true}));
    }
}
