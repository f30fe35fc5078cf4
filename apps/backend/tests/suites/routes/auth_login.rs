use actix_web::http::StatusCode;
use actix_web::test;
use backend::verify_access_token;
use backend_test_support::problem_details::assert_problem_details_from_service_response;
use backend_test_support::unique_helpers::{unique_email, unique_username};
use serde_json::Value;

use crate::support::factory::{login_response, register, PASSWORD};
use crate::support::{build_test_state, create_test_app, test_settings};

#[actix_web::test]
async fn login_returns_bearer_token_for_user() {
    let settings = test_settings();
    let state = build_test_state(&settings).await;
    let security = state.security.clone();
    let app = create_test_app(state, &settings).await;

    let username = unique_username("login");
    let user = register(&app, "/api", &username, &unique_email("login"), PASSWORD).await;

    let resp = login_response(&app, "/api", &username, PASSWORD).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["token_type"], "bearer");

    let token = body["access_token"].as_str().unwrap();
    let claims = verify_access_token(token, &security).expect("token should verify");
    assert_eq!(claims.sub, user["id"].as_str().unwrap());
    assert_eq!(claims.username, username);
    assert!(claims.exp > claims.iat);
}

#[actix_web::test]
async fn login_accepts_trailing_slash() {
    let settings = test_settings();
    let app = create_test_app(build_test_state(&settings).await, &settings).await;

    let username = unique_username("slash");
    register(&app, "/api", &username, &unique_email("slash"), PASSWORD).await;

    let req = test::TestRequest::post()
        .uri("/api/login/")
        .set_form([("username", username.as_str()), ("password", PASSWORD)])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn wrong_password_and_unknown_user_look_the_same() {
    let settings = test_settings();
    let app = create_test_app(build_test_state(&settings).await, &settings).await;

    let username = unique_username("neg");
    register(&app, "/api", &username, &unique_email("neg"), PASSWORD).await;

    let wrong = login_response(&app, "/api", &username, "not the password").await;
    assert!(wrong.headers().get("www-authenticate").is_some());
    let wrong = assert_problem_details_from_service_response(
        wrong,
        "INVALID_CREDENTIALS",
        StatusCode::UNAUTHORIZED,
        None,
    )
    .await;

    let unknown = login_response(&app, "/api", "nobody-here", PASSWORD).await;
    let unknown = assert_problem_details_from_service_response(
        unknown,
        "INVALID_CREDENTIALS",
        StatusCode::UNAUTHORIZED,
        None,
    )
    .await;

    assert_eq!(wrong.detail, unknown.detail);
}

#[actix_web::test]
async fn login_with_missing_field_is_rejected() {
    let settings = test_settings();
    let app = create_test_app(build_test_state(&settings).await, &settings).await;

    let req = test::TestRequest::post()
        .uri("/api/login")
        .set_form([("username", "someone")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details_from_service_response(
        resp,
        "VALIDATION_ERROR",
        StatusCode::UNPROCESSABLE_ENTITY,
        None,
    )
    .await;
}
