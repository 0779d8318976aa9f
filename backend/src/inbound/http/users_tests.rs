//! Tests for the account handlers.

use super::*;
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test};
use mockall::predicate::eq;
use rstest::rstest;
use serde_json::{Value, json};

use crate::domain::{BIO_MAX, Bio, ProgramId, UserId};
use crate::inbound::http::test_utils::{
    MockPorts, login_request, session_cookie, test_login_resource, test_session_middleware,
};

const PROGRAM: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

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
                .service(sign_up)
                .service(update_bio)
                .service(username_exists)
                .service(get_profile),
        )
}

fn stored_user(user_number: i64) -> User {
    User {
        id: id("user_a"),
        program_id: PROGRAM.parse::<ProgramId>().expect("program id"),
        account_type: AccountType::Student,
        bio: None,
        user_number,
        created_at: DateTime::<Utc>::UNIX_EPOCH,
    }
}

#[actix_web::test]
async fn sign_up_returns_created_with_user_number() {
    let mut ports = MockPorts::default();
    ports
        .accounts
        .expect_sign_up()
        .withf(|command| {
            command.caller.as_ref() == "user_a"
                && command.user_id.as_ref() == "user_a"
                && command.account_type == AccountType::Faculty
        })
        .times(1)
        .return_once(|_| Ok(stored_user(17)));
    let app = actix_test::init_service(test_app(ports)).await;
    let login = actix_test::call_service(&app, login_request("user_a").to_request()).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/users/sign-up")
            .cookie(session_cookie(&login))
            .set_json(json!({"userId": "user_a", "programId": PROGRAM, "type": "faculty"}))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body, json!({"userNumber": 17}));
}

#[rstest]
#[case(json!({"userId": "user_a", "programId": "bsit", "type": "student"}), "programId")]
#[case(json!({"userId": "user_a", "programId": PROGRAM, "type": "dean"}), "type")]
#[case(json!({"userId": "", "programId": PROGRAM, "type": "student"}), "userId")]
#[actix_web::test]
async fn sign_up_validates_fields_before_calling_port(
    #[case] body: Value,
    #[case] field: &str,
) {
    let mut ports = MockPorts::default();
    ports.accounts.expect_sign_up().never();
    let app = actix_test::init_service(test_app(ports)).await;
    let login = actix_test::call_service(&app, login_request("user_a").to_request()).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/users/sign-up")
            .cookie(session_cookie(&login))
            .set_json(body)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let payload: Value = actix_test::read_body_json(res).await;
    assert_eq!(payload["details"]["field"], field);
}

#[actix_web::test]
async fn oversize_bio_never_reaches_the_port() {
    let mut ports = MockPorts::default();
    ports.accounts.expect_update_bio().never();
    let app = actix_test::init_service(test_app(ports)).await;
    let login = actix_test::call_service(&app, login_request("user_a").to_request()).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri("/api/v1/users/me/bio")
            .cookie(session_cookie(&login))
            .set_json(json!({"bio": "x".repeat(BIO_MAX + 1)}))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let payload: Value = actix_test::read_body_json(res).await;
    assert_eq!(payload["message"], "Bio must be less than 128 characters");
}

#[actix_web::test]
async fn bio_update_targets_session_user() {
    let mut ports = MockPorts::default();
    ports
        .accounts
        .expect_update_bio()
        .with(eq(id("user_a")), eq(Bio::new("hello").expect("bio")))
        .times(1)
        .return_once(|_, _| Ok(()));
    let app = actix_test::init_service(test_app(ports)).await;
    let login = actix_test::call_service(&app, login_request("user_a").to_request()).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri("/api/v1/users/me/bio")
            .cookie(session_cookie(&login))
            .set_json(json!({"bio": "hello"}))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
}

#[rstest]
#[case(UsernameStatus::Reserved, true, "reserved")]
#[case(UsernameStatus::Taken, true, "taken")]
#[case(UsernameStatus::Available, false, "available")]
#[case(UsernameStatus::Invalid, false, "invalid")]
#[actix_web::test]
async fn username_exists_is_public(
    #[case] status: UsernameStatus,
    #[case] exists: bool,
    #[case] label: &str,
) {
    let mut ports = MockPorts::default();
    ports
        .usernames
        .expect_username_status()
        .withf(|candidate| candidate == "juan dela cruz")
        .return_once(move |_| Ok(status));
    let app = actix_test::init_service(test_app(ports)).await;

    let body: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/users/username-exists")
            .set_json(json!({"username": "juan dela cruz"}))
            .to_request(),
    )
    .await;
    assert_eq!(body, json!({"exists": exists, "status": label}));
}

#[actix_web::test]
async fn profile_is_serialised_camel_case() {
    let mut ports = MockPorts::default();
    ports
        .profiles
        .expect_fetch_profile()
        .with(eq(id("user_a")))
        .return_once(|_| Ok(stored_user(3)));
    let app = actix_test::init_service(test_app(ports)).await;
    let login = actix_test::call_service(&app, login_request("user_b").to_request()).await;

    let body: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/users/user_a")
            .cookie(session_cookie(&login))
            .to_request(),
    )
    .await;
    assert_eq!(body["userNumber"], 3);
    assert_eq!(body["programId"], PROGRAM);
    assert_eq!(body["accountType"], "student");
}
