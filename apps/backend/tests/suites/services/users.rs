use backend::errors::ErrorCode;
use backend::repos::users as users_repo;
use backend::services::users::{self, NewUser, ProfileUpdate};
use backend::AppError;
use backend_test_support::unique_helpers::{unique_email, unique_username};

use super::fresh_db;

fn new_user(hint: &str) -> NewUser {
    NewUser {
        username: unique_username(hint),
        email: unique_email(hint),
        password: "hunter2hunter2".to_string(),
    }
}

#[tokio::test]
async fn register_stores_hash_not_password() {
    let db = fresh_db().await;
    let input = new_user("hash");

    let user = users::register(&db, input.clone()).await.unwrap();

    assert_ne!(user.hashed_password, input.password);
    assert!(user.hashed_password.starts_with("$2"));
    let stored = users_repo::find_by_username(&db, &input.username)
        .await
        .unwrap()
        .expect("user should be stored");
    assert_eq!(stored.id, user.id);
}

#[tokio::test]
async fn email_is_trimmed_and_checked_for_duplicates() {
    let db = fresh_db().await;
    let mut input = new_user("mail");
    let email = input.email.clone();
    input.email = format!("  {email} ");

    let user = users::register(&db, input).await.unwrap();
    assert_eq!(user.email, email);

    let mut again = new_user("mail2");
    again.email = email;
    let err = users::register(&db, again).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::EmailTaken);
}

#[tokio::test]
async fn lookup_by_email_uses_the_stored_form() {
    let db = fresh_db().await;
    let mut input = new_user("lookup");
    let email = input.email.clone();
    input.email = format!(" {email}  ");
    let user = users::register(&db, input).await.unwrap();

    let found = users_repo::find_by_email(&db, &email)
        .await
        .unwrap()
        .expect("registered email should be found");
    assert_eq!(found.id, user.id);

    let missing = users_repo::find_by_email(&db, &unique_email("nobody"))
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn empty_profile_update_changes_nothing() {
    let db = fresh_db().await;
    let user = users::register(&db, new_user("noop")).await.unwrap();

    let same = users::update_profile(&db, &user.id, ProfileUpdate::default())
        .await
        .unwrap();
    assert_eq!(same.username, user.username);
    assert_eq!(same.hashed_password, user.hashed_password);
}

#[tokio::test]
async fn profile_of_unknown_user_is_an_error() {
    let db = fresh_db().await;

    let err = users::get_profile(&db, "no-such-id").await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::UserNotFound);
    assert!(matches!(err, AppError::BadRequest { .. }));

    let err = users::delete_account(&db, "no-such-id").await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::UserNotFound);
}
