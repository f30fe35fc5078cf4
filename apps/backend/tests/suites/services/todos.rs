use backend::entities::todos::TodoState;
use backend::errors::ErrorCode;
use backend::services::todos::{self, NewTodo, TodoChanges};
use backend::services::users::{self, NewUser};
use backend_test_support::unique_helpers::{unique_email, unique_username};
use sea_orm::DatabaseConnection;

use super::fresh_db;

async fn make_user(db: &DatabaseConnection, hint: &str) -> String {
    users::register(
        db,
        NewUser {
            username: unique_username(hint),
            email: unique_email(hint),
            password: "pw".to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

fn titled(title: &str) -> NewTodo {
    NewTodo {
        title: title.to_string(),
        description: None,
        state: None,
    }
}

#[tokio::test]
async fn limit_is_capped() {
    let db = fresh_db().await;
    let user_id = make_user(&db, "cap").await;

    for i in 0..3 {
        todos::create(&db, &user_id, titled(&format!("t{i}"))).await.unwrap();
    }

    let all = todos::list(&db, &user_id, None, Some(5000)).await.unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(todos::page_bounds(None, Some(5000)), (0, todos::MAX_LIMIT));

    let none = todos::list(&db, &user_id, None, Some(0)).await.unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn update_state_only() {
    let db = fresh_db().await;
    let user_id = make_user(&db, "st").await;
    let todo = todos::create(&db, &user_id, titled("x")).await.unwrap();
    assert_eq!(todo.state, TodoState::Pendiente);

    let changes = TodoChanges {
        state: Some("en_progreso".to_string()),
        ..Default::default()
    };
    let updated = todos::update(&db, &user_id, &todo.id, changes).await.unwrap();
    assert_eq!(updated.state, TodoState::EnProgreso);
    assert_eq!(updated.title, "x");
}

#[tokio::test]
async fn deleting_user_removes_their_todos() {
    let db = fresh_db().await;
    let user_id = make_user(&db, "cascade").await;
    let todo = todos::create(&db, &user_id, titled("bye")).await.unwrap();

    users::delete_account(&db, &user_id).await.unwrap();

    let found = backend::repos::todos::find_by_id(&db, &todo.id).await.unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn foreign_todo_is_not_found() {
    let db = fresh_db().await;
    let owner = make_user(&db, "own").await;
    let other = make_user(&db, "oth").await;
    let todo = todos::create(&db, &owner, titled("mine")).await.unwrap();

    let err = todos::get(&db, &other, &todo.id).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::TodoNotFound);

    let err = todos::delete(&db, &other, &todo.id).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::TodoNotFound);
    assert!(todos::get(&db, &owner, &todo.id).await.is_ok());
}
