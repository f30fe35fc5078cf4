use actix_web::http::StatusCode;
use actix_web::test;
use backend::infra::state::build_state;
use serde_json::Value;

use crate::support::factory::signup;
use crate::support::test_state::TEST_SECRET;
use crate::support::{build_test_state, create_test_app, test_settings, test_settings_with};

#[actix_web::test]
async fn root_returns_welcome_message() {
    let settings = test_settings();
    let app = create_test_app(build_test_state(&settings).await, &settings).await;

    let req = test::TestRequest::get().uri("/").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["message"], "Welcome to a simple Todo API");
}

#[actix_web::test]
async fn health_reports_db_and_migrations() {
    let settings = test_settings();
    let app = create_test_app(build_test_state(&settings).await, &settings).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;

    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "ok");
    assert!(body.get("db_error").is_none());
    assert_eq!(body["app_version"], env!("CARGO_PKG_VERSION"));
    assert!(body["migrations"].as_str().is_some_and(|m| m != "unknown"));
    assert!(body["time"].as_str().is_some());
}

#[actix_web::test]
async fn health_without_db_still_answers() {
    let settings = test_settings();
    let state = build_state().build().await.expect("state without db");
    let app = create_test_app(state, &settings).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["db"], "error");
    assert_eq!(body["db_error"], "DB unavailable");
}

#[actix_web::test]
async fn routes_needing_db_fail_with_503_without_one() {
    let settings = test_settings();
    let state = build_state().build().await.expect("state without db");
    let app = create_test_app(state, &settings).await;

    let req = test::TestRequest::post()
        .uri("/api/user")
        .set_json(serde_json::json!({ "username": "u", "email": "u@example.test", "password": "pw" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert!(resp.headers().get("retry-after").is_some());
}

#[actix_web::test]
async fn info_exposes_no_secrets() {
    let settings = test_settings_with(&[("DEBUG", "true"), ("API_PREFIX", "/v1")]);
    let app = create_test_app(build_test_state(&settings).await, &settings).await;

    let req = test::TestRequest::get().uri("/info").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let raw = test::read_body(resp).await;
    let body: Value = serde_json::from_slice(&raw).unwrap();

    assert_eq!(body["app_name"], "Todo API");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(body["debug_mode"], true);
    assert_eq!(body["api_prefix"], "/v1");

    let text = String::from_utf8_lossy(&raw);
    assert!(!text.contains(TEST_SECRET));
    assert!(!text.contains("sqlite"));
}

#[actix_web::test]
async fn custom_prefix_moves_api_routes_only() {
    let settings = test_settings_with(&[("API_PREFIX", "/v1")]);
    let app = create_test_app(build_test_state(&settings).await, &settings).await;

    let user = signup(&app, "/v1", "prefixed").await;
    let req = test::TestRequest::get()
        .uri("/v1/tasks")
        .insert_header(user.bearer())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/api/tasks").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get().uri("/health").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn empty_prefix_mounts_api_at_root() {
    let settings = test_settings_with(&[("API_PREFIX", "")]);
    let app = create_test_app(build_test_state(&settings).await, &settings).await;

    let req = test::TestRequest::get().uri("/").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["message"], "Welcome to a simple Todo API");

    let user = signup(&app, "", "rootapi").await;
    let req = test::TestRequest::get()
        .uri("/tasks")
        .insert_header(user.bearer())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}
