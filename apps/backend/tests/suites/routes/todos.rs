use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::problem_details::assert_problem_details_from_service_response;
use serde_json::{json, Value};

use crate::support::factory::{create_todo, signup};
use crate::support::{build_test_state, create_test_app, test_settings};

#[actix_web::test]
async fn create_defaults_to_pendiente() {
    let settings = test_settings();
    let app = create_test_app(build_test_state(&settings).await, &settings).await;
    let user = signup(&app, "/api", "todo").await;

    let todo = create_todo(&app, "/api", &user, json!({ "title": "  Buy milk  " })).await;

    assert_eq!(todo["title"], "Buy milk");
    assert_eq!(todo["state"], "pendiente");
    assert_eq!(todo["description"], Value::Null);
    assert_eq!(todo["user_id"], user.id.as_str());
    assert!(todo["id"].as_str().is_some_and(|id| !id.is_empty()));
    assert!(todo["created_at"].as_str().is_some());
}

#[actix_web::test]
async fn create_with_all_fields() {
    let settings = test_settings();
    let app = create_test_app(build_test_state(&settings).await, &settings).await;
    let user = signup(&app, "/api", "full").await;

    let todo = create_todo(
        &app,
        "/api",
        &user,
        json!({ "title": "Write report", "description": "Q3 numbers", "state": "en_progreso" }),
    )
    .await;

    assert_eq!(todo["description"], "Q3 numbers");
    assert_eq!(todo["state"], "en_progreso");
}

#[actix_web::test]
async fn invalid_todo_input_is_422() {
    let settings = test_settings();
    let app = create_test_app(build_test_state(&settings).await, &settings).await;
    let user = signup(&app, "/api", "bad").await;

    let cases = [
        (json!({ "title": "" }), "INVALID_TITLE"),
        (json!({ "title": "t".repeat(101) }), "INVALID_TITLE"),
        (json!({ "title": "ok", "description": "d".repeat(501) }), "INVALID_DESCRIPTION"),
        (json!({ "title": "ok", "state": "done" }), "INVALID_STATE"),
        (json!({ "description": "no title" }), "VALIDATION_ERROR"),
    ];

    for (body, code) in cases {
        let req = test::TestRequest::post()
            .uri("/api/tasks")
            .insert_header(user.bearer())
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_problem_details_from_service_response(
            resp,
            code,
            StatusCode::UNPROCESSABLE_ENTITY,
            None,
        )
        .await;
    }
}

#[actix_web::test]
async fn malformed_json_is_400() {
    let settings = test_settings();
    let app = create_test_app(build_test_state(&settings).await, &settings).await;
    let user = signup(&app, "/api", "json").await;

    let req = test::TestRequest::post()
        .uri("/api/tasks")
        .insert_header(user.bearer())
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{\"title\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(resp, "BAD_REQUEST", StatusCode::BAD_REQUEST, None)
        .await;
}

#[actix_web::test]
async fn list_returns_only_own_todos_in_creation_order() {
    let settings = test_settings();
    let app = create_test_app(build_test_state(&settings).await, &settings).await;
    let alice = signup(&app, "/api", "alice").await;
    let bob = signup(&app, "/api", "bob").await;

    for title in ["first", "second", "third"] {
        create_todo(&app, "/api", &alice, json!({ "title": title })).await;
    }
    create_todo(&app, "/api", &bob, json!({ "title": "bob's" })).await;

    let req = test::TestRequest::get()
        .uri("/api/tasks")
        .insert_header(alice.bearer())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let list: Vec<Value> = test::read_body_json(resp).await;

    let titles: Vec<&str> = list.iter().map(|t| t["title"].as_str().unwrap()).collect();
    assert_eq!(titles, vec!["first", "second", "third"]);
    assert!(list.iter().all(|t| t["user_id"] == alice.id.as_str()));
}

#[actix_web::test]
async fn list_pagination_skip_and_limit() {
    let settings = test_settings();
    let app = create_test_app(build_test_state(&settings).await, &settings).await;
    let user = signup(&app, "/api", "page").await;

    for i in 0..5 {
        create_todo(&app, "/api", &user, json!({ "title": format!("todo {i}") })).await;
    }

    let req = test::TestRequest::get()
        .uri("/api/tasks/?skip=1&limit=2")
        .insert_header(user.bearer())
        .to_request();
    let list: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    let titles: Vec<&str> = list.iter().map(|t| t["title"].as_str().unwrap()).collect();
    assert_eq!(titles, vec!["todo 1", "todo 2"]);

    let req = test::TestRequest::get()
        .uri("/api/tasks?skip=10")
        .insert_header(user.bearer())
        .to_request();
    let list: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert!(list.is_empty());
}

#[actix_web::test]
async fn skip_beyond_signed_range_is_an_empty_page() {
    let settings = test_settings();
    let app = create_test_app(build_test_state(&settings).await, &settings).await;
    let user = signup(&app, "/api", "far").await;
    create_todo(&app, "/api", &user, json!({ "title": "only" })).await;

    for skip in ["9223372036854775807", "9223372036854775808", "18446744073709551615"] {
        let req = test::TestRequest::get()
            .uri(&format!("/api/tasks?skip={skip}"))
            .insert_header(user.bearer())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK, "skip={skip}");
        let list: Vec<Value> = test::read_body_json(resp).await;
        assert!(list.is_empty(), "skip={skip}");
    }
}

#[actix_web::test]
async fn bad_pagination_query_is_422() {
    let settings = test_settings();
    let app = create_test_app(build_test_state(&settings).await, &settings).await;
    let user = signup(&app, "/api", "q").await;

    let req = test::TestRequest::get()
        .uri("/api/tasks?limit=-1")
        .insert_header(user.bearer())
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

#[actix_web::test]
async fn get_update_delete_roundtrip() {
    let settings = test_settings();
    let app = create_test_app(build_test_state(&settings).await, &settings).await;
    let user = signup(&app, "/api", "crud").await;

    let todo = create_todo(
        &app,
        "/api",
        &user,
        json!({ "title": "Original", "description": "keep me" }),
    )
    .await;
    let id = todo["id"].as_str().unwrap().to_string();
    let uri = format!("/api/tasks/{id}");

    let req = test::TestRequest::get()
        .uri(&uri)
        .insert_header(user.bearer())
        .to_request();
    let fetched: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fetched["title"], "Original");

    // Only the state changes; title and description stay.
    let req = test::TestRequest::put()
        .uri(&uri)
        .insert_header(user.bearer())
        .set_json(json!({ "state": "completado" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Value = test::read_body_json(resp).await;
    assert_eq!(updated["state"], "completado");
    assert_eq!(updated["title"], "Original");
    assert_eq!(updated["description"], "keep me");
    assert_eq!(updated["created_at"], todo["created_at"]);

    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(user.bearer())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Todo deleted successfully");

    let req = test::TestRequest::get()
        .uri(&uri)
        .insert_header(user.bearer())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(resp, "TODO_NOT_FOUND", StatusCode::NOT_FOUND, None)
        .await;
}

#[actix_web::test]
async fn explicit_null_clears_description() {
    let settings = test_settings();
    let app = create_test_app(build_test_state(&settings).await, &settings).await;
    let user = signup(&app, "/api", "null").await;

    let todo = create_todo(&app, "/api", &user, json!({ "title": "t", "description": "d" })).await;
    let uri = format!("/api/tasks/{}", todo["id"].as_str().unwrap());

    let req = test::TestRequest::put()
        .uri(&uri)
        .insert_header(user.bearer())
        .set_json(json!({ "title": "renamed" }))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["description"], "d");

    let req = test::TestRequest::put()
        .uri(&uri)
        .insert_header(user.bearer())
        .set_json(json!({ "description": null }))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["description"], Value::Null);
    assert_eq!(updated["title"], "renamed");
}

#[actix_web::test]
async fn invalid_update_leaves_todo_unchanged() {
    let settings = test_settings();
    let app = create_test_app(build_test_state(&settings).await, &settings).await;
    let user = signup(&app, "/api", "atomic").await;

    let todo = create_todo(&app, "/api", &user, json!({ "title": "stable" })).await;
    let uri = format!("/api/tasks/{}", todo["id"].as_str().unwrap());

    let req = test::TestRequest::put()
        .uri(&uri)
        .insert_header(user.bearer())
        .set_json(json!({ "title": "changed", "state": "bogus" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "INVALID_STATE",
        StatusCode::UNPROCESSABLE_ENTITY,
        None,
    )
    .await;

    let req = test::TestRequest::get()
        .uri(&uri)
        .insert_header(user.bearer())
        .to_request();
    let fetched: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fetched["title"], "stable");
}

#[actix_web::test]
async fn other_users_todos_are_not_found() {
    let settings = test_settings();
    let app = create_test_app(build_test_state(&settings).await, &settings).await;
    let owner = signup(&app, "/api", "owner").await;
    let intruder = signup(&app, "/api", "intruder").await;

    let todo = create_todo(&app, "/api", &owner, json!({ "title": "private" })).await;
    let uri = format!("/api/tasks/{}", todo["id"].as_str().unwrap());

    let requests = [
        test::TestRequest::get().uri(&uri),
        test::TestRequest::put().uri(&uri).set_json(json!({ "title": "mine now" })),
        test::TestRequest::delete().uri(&uri),
    ];
    for req in requests {
        let req = req.insert_header(intruder.bearer()).to_request();
        let resp = test::call_service(&app, req).await;
        assert_problem_details_from_service_response(
            resp,
            "TODO_NOT_FOUND",
            StatusCode::NOT_FOUND,
            Some("Todo not found"),
        )
        .await;
    }

    // Untouched for the owner.
    let req = test::TestRequest::get()
        .uri(&uri)
        .insert_header(owner.bearer())
        .to_request();
    let fetched: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fetched["title"], "private");
}

#[actix_web::test]
async fn unknown_todo_id_is_not_found() {
    let settings = test_settings();
    let app = create_test_app(build_test_state(&settings).await, &settings).await;
    let user = signup(&app, "/api", "nf").await;

    let req = test::TestRequest::delete()
        .uri("/api/tasks/00000000-0000-0000-0000-000000000000")
        .insert_header(user.bearer())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(resp, "TODO_NOT_FOUND", StatusCode::NOT_FOUND, None)
        .await;
}
