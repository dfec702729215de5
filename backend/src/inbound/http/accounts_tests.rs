//! Tests for the account HTTP handlers.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use actix_web::http::StatusCode;
use actix_web::{App, HttpResponse, test as actix_test, web};
use rstest::rstest;
use serde_json::Value;

use super::*;
use crate::domain::{NON_FIELD_ERRORS, PASSWORD_MISMATCH, SessionGeneration, User};
use crate::inbound::http::test_utils::{TestPorts, session_cookie, test_session_middleware};

const ALICE_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

fn alice_id() -> UserId {
    UserId::new(ALICE_ID).expect("fixture id")
}

async fn whoami(state: web::Data<HttpState>, session: SessionContext) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id(state.login.as_ref()).await?;
    Ok(HttpResponse::Ok().body(user_id.to_string()))
}

fn test_app(
    ports: TestPorts,
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
        .app_data(ports.into_state())
        .wrap(test_session_middleware())
        .service(
            web::scope("/accounts")
                .service(registration_form)
                .service(register)
                .service(login_form)
                .service(login)
                .service(logout),
        )
        .route("/whoami", web::get().to(whoami))
}

fn location<B>(response: &actix_web::dev::ServiceResponse<B>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("location header")
        .to_str()
        .expect("ascii location")
}

fn accepting_credentials(ports: &mut TestPorts) {
    ports
        .login
        .expect_authenticate()
        .withf(|creds| creds.username() == "alice" && creds.password() == "s3cret")
        .returning(|_| Ok(alice_id()));
}

fn accepting_login(ports: &mut TestPorts) {
    accepting_credentials(ports);
    ports
        .login
        .expect_session_generation()
        .returning(|_| Ok(Some(SessionGeneration::INITIAL)));
}

async fn log_in_alice(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
) -> actix_web::cookie::Cookie<'static> {
    let res = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/accounts/login")
            .set_form(&[("username", "alice"), ("password", "s3cret")])
            .to_request(),
    )
    .await;
    session_cookie(&res).expect("session cookie")
}

#[rstest]
#[case("/accounts/login?next=/profiles/bob", "/profiles/bob")]
#[case("/accounts/login?next=", "/")]
#[case("/accounts/login", "/")]
#[case("/accounts/login?next=https://docs.example.org/", "https://docs.example.org/")]
#[case("/accounts/login?next=//docs.example.org", "//docs.example.org")]
#[actix_web::test]
async fn login_redirects_to_next_or_home(#[case] uri: &str, #[case] expected: &str) {
    let mut ports = TestPorts::default();
    accepting_login(&mut ports);
    let app = actix_test::init_service(test_app(ports)).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(uri)
            .set_form(&[("username", "alice"), ("password", "s3cret")])
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), expected);
    assert!(session_cookie(&res).is_some(), "session cookie issued");
}

#[actix_web::test]
async fn login_establishes_session_for_user() {
    let mut ports = TestPorts::default();
    accepting_login(&mut ports);
    let app = actix_test::init_service(test_app(ports)).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/accounts/login")
            .set_form(&[("username", "alice"), ("password", "s3cret")])
            .to_request(),
    )
    .await;
    let cookie = session_cookie(&res).expect("session cookie");

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/whoami")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(actix_test::read_body(res).await, ALICE_ID);
}

#[actix_web::test]
async fn login_with_blank_fields_reports_each_field() {
    let app = actix_test::init_service(test_app(TestPorts::default())).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/accounts/login")
            .set_form(&[("username", " "), ("password", "")])
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["fields"]["username"][0], FIELD_REQUIRED);
    assert_eq!(body["details"]["fields"]["password"][0], FIELD_REQUIRED);
}

#[actix_web::test]
async fn login_failure_is_unauthorised_with_non_field_error() {
    let mut ports = TestPorts::default();
    ports.login.expect_authenticate().returning(|_| {
        let mut errors = FormErrors::default();
        errors.add(NON_FIELD_ERRORS, INVALID_LOGIN);
        Err(Error::unauthorized(INVALID_LOGIN)
            .with_details(serde_json::json!({ "fields": errors })))
    });
    let app = actix_test::init_service(test_app(ports)).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/accounts/login?next=/profiles/bob")
            .set_form(&[("username", "alice"), ("password", "wrong")])
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert!(res.headers().get(header::LOCATION).is_none());
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["message"], INVALID_LOGIN);
    assert_eq!(body["details"]["fields"][NON_FIELD_ERRORS][0], INVALID_LOGIN);
}

#[rstest]
#[case("/accounts/login?next=/profiles/bob", Some("/profiles/bob"))]
#[case("/accounts/login", Some(""))]
#[actix_web::test]
async fn login_form_echoes_next(#[case] uri: &str, #[case] expected: Option<&str>) {
    let app = actix_test::init_service(test_app(TestPorts::default())).await;

    let res =
        actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request()).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["next"].as_str(), expected);
    assert_eq!(body["fields"], serde_json::json!(["username", "password"]));
}

#[actix_web::test]
async fn registration_form_lists_fields() {
    let app = actix_test::init_service(test_app(TestPorts::default())).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/accounts/register")
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(
        body,
        serde_json::json!({ "fields": ["username", "password1", "password2"] })
    );
}

#[actix_web::test]
async fn registration_creates_user_and_logs_in() {
    let mut ports = TestPorts::default();
    ports
        .registration
        .expect_register()
        .withf(|registration| registration.username().as_ref() == "alice")
        .times(1)
        .returning(|registration| Ok(User::new(alice_id(), registration.username().clone())));
    accepting_login(&mut ports);
    let app = actix_test::init_service(test_app(ports)).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/accounts/register")
            .set_form(&[
                ("username", "alice"),
                ("password1", "s3cret"),
                ("password2", "s3cret"),
            ])
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), HOME_PATH);
    let cookie = session_cookie(&res).expect("session cookie");
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/whoami")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(actix_test::read_body(res).await, ALICE_ID);
}

#[actix_web::test]
async fn registration_rejects_mismatched_passwords_before_calling_service() {
    let mut ports = TestPorts::default();
    ports.registration.expect_register().never();
    let app = actix_test::init_service(test_app(ports)).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/accounts/register")
            .set_form(&[
                ("username", "alice"),
                ("password1", "one"),
                ("password2", "two"),
            ])
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["details"]["fields"]["password2"][0], PASSWORD_MISMATCH);
}

#[actix_web::test]
async fn registration_propagates_post_creation_login_failure() {
    let mut ports = TestPorts::default();
    ports.registration.expect_register().returning(|registration| {
        Ok(User::new(UserId::random(), registration.username().clone()))
    });
    ports
        .login
        .expect_authenticate()
        .returning(|_| Err(Error::service_unavailable("user store offline")));
    let app = actix_test::init_service(test_app(ports)).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/accounts/register")
            .set_form(&[
                ("username", "alice"),
                ("password1", "pw"),
                ("password2", "pw"),
            ])
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["code"], "service_unavailable");
}

#[actix_web::test]
async fn login_for_a_vanished_user_is_unauthorised() {
    let mut ports = TestPorts::default();
    accepting_credentials(&mut ports);
    ports
        .login
        .expect_session_generation()
        .returning(|_| Ok(None));
    let app = actix_test::init_service(test_app(ports)).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/accounts/login")
            .set_form(&[("username", "alice"), ("password", "s3cret")])
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert!(session_cookie(&res).is_none());
}

#[actix_web::test]
async fn anonymous_logout_redirects_home_without_revoking() {
    let mut ports = TestPorts::default();
    ports.login.expect_revoke_sessions().never();
    let app = actix_test::init_service(test_app(ports)).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/accounts/logout")
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), HOME_PATH);
}

#[actix_web::test]
async fn logout_revokes_the_presented_session() {
    let generation = Arc::new(AtomicI64::new(0));
    let mut ports = TestPorts::default();
    accepting_credentials(&mut ports);
    let current = generation.clone();
    ports
        .login
        .expect_session_generation()
        .returning(move |_| Ok(Some(SessionGeneration::new(current.load(Ordering::SeqCst)))));
    let bumped = generation.clone();
    ports
        .login
        .expect_revoke_sessions()
        .withf(|user_id| user_id == &alice_id())
        .times(1)
        .returning(move |_| {
            bumped.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
    let app = actix_test::init_service(test_app(ports)).await;
    let cookie = log_in_alice(&app).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/accounts/logout")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), HOME_PATH);
    assert_eq!(
        session_cookie(&res).expect("removal cookie").value(),
        "",
        "cookie expired"
    );

    let replay = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/whoami")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(replay.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn logout_reports_revocation_failures() {
    let mut ports = TestPorts::default();
    accepting_login(&mut ports);
    ports
        .login
        .expect_revoke_sessions()
        .returning(|_| Err(Error::service_unavailable("user store offline")));
    let app = actix_test::init_service(test_app(ports)).await;
    let cookie = log_in_alice(&app).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/accounts/logout")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
}
