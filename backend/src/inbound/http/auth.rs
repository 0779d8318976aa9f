//! Session establishment handlers.
//!
//! ```text
//! POST /api/v1/session {"token":"<identity provider session token>"}
//! DELETE /api/v1/session
//! ```

use actix_web::{HttpResponse, delete, post, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::domain::Error;
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_session_token};

/// Body for `POST /api/v1/session`.
#[derive(Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    /// Session token issued by the identity provider.
    pub token: String,
}

/// Exchange an identity provider token for a session cookie.
#[utoipa::path(
    post,
    path = "/api/v1/session",
    request_body = CreateSessionRequest,
    responses(
        (status = 204, description = "Session established", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Malformed token", body = Error),
        (status = 401, description = "Token rejected", body = Error),
        (status = 503, description = "Identity provider unavailable", body = Error)
    ),
    tags = ["session"],
    operation_id = "createSession",
    security([])
)]
#[post("/session")]
pub async fn create_session(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateSessionRequest>,
) -> ApiResult<HttpResponse> {
    let token = parse_session_token(&payload.token, FieldName::new("token"))?;
    let user_id = state.sessions.authenticate(&token).await?;
    session.persist_user(&user_id)?;
    info!(user_id = %user_id, "session established");
    Ok(HttpResponse::NoContent().finish())
}

/// Clear the session cookie.
#[utoipa::path(
    delete,
    path = "/api/v1/session",
    responses((status = 204, description = "Session cleared")),
    tags = ["session"],
    operation_id = "deleteSession",
    security([])
)]
#[delete("/session")]
pub async fn delete_session(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::NoContent().finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, get, test as actix_test};
    use serde_json::json;

    use crate::domain::UserId;
    use crate::inbound::http::test_utils::{MockPorts, session_cookie, test_session_middleware};

    #[get("/whoami")]
    async fn whoami(session: SessionContext) -> ApiResult<HttpResponse> {
        let id = session.require_user_id()?;
        Ok(HttpResponse::Ok().body(id.to_string()))
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
            .service(whoami)
            .service(
                web::scope("/api/v1")
                    .service(create_session)
                    .service(delete_session),
            )
    }

    #[actix_web::test]
    async fn valid_token_sets_session_user() {
        let mut ports = MockPorts::default();
        ports
            .sessions
            .expect_authenticate()
            .withf(|token| token.expose() == "sess_ok")
            .return_once(|_| Ok(UserId::new("user_a").expect("id")));
        let app = actix_test::init_service(test_app(ports)).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/session")
                .set_json(json!({"token": "sess_ok"}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
        let cookie = session_cookie(&res);

        let body = actix_test::call_and_read_body(
            &app,
            actix_test::TestRequest::get()
                .uri("/whoami")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(body, "user_a");
    }

    #[actix_web::test]
    async fn rejected_token_is_unauthorised() {
        let mut ports = MockPorts::default();
        ports
            .sessions
            .expect_authenticate()
            .return_once(|_| Err(Error::unauthorized("invalid session token")));
        let app = actix_test::init_service(test_app(ports)).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/session")
                .set_json(json!({"token": "sess_bad"}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn blank_token_is_rejected_without_calling_provider() {
        let mut ports = MockPorts::default();
        ports.sessions.expect_authenticate().never();
        let app = actix_test::init_service(test_app(ports)).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/session")
                .set_json(json!({"token": "  "}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
