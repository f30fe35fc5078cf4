use sea_orm::ConnectionTrait;
use serde::Deserialize;
use tracing::info;

use crate::auth::password::hash_password;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::logging::pii::Redacted;
use crate::repos::users::{self, User, UserUpdate};
use crate::services::validation;

/// Registration input.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Profile update input; absent fields are left alone.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

fn user_not_found() -> AppError {
    AppError::bad_request(ErrorCode::UserNotFound, "User not found or unauthorized")
}

/// Validate, hash the password and insert. Duplicate username/email is a 409.
pub async fn register<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    input: NewUser,
) -> Result<User, AppError> {
    let username = validation::username(&input.username)?;
    let email = validation::email(&input.email)?;
    validation::password(&input.password)?;

    let hashed = hash_password(&input.password)?;
    let user = users::create_user(conn, &username, &email, &hashed).await?;

    info!(user_id = %user.id, email = %Redacted(&user.email), "user registered");
    Ok(user)
}

pub async fn get_profile<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: &str,
) -> Result<User, AppError> {
    users::find_by_id(conn, user_id)
        .await?
        .ok_or_else(user_not_found)
}

/// Rename and/or change password. The stored hash is only replaced when a
/// new password is supplied.
pub async fn update_profile<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: &str,
    input: ProfileUpdate,
) -> Result<User, AppError> {
    // Ownership first, so a stale token can't trigger validation work.
    get_profile(conn, user_id).await?;

    let mut update = UserUpdate::default();
    if let Some(raw) = input.username.as_deref() {
        update = update.with_username(validation::username(raw)?);
    }
    if let Some(raw) = input.password.as_deref() {
        validation::password(raw)?;
        update = update.with_hashed_password(hash_password(raw)?);
    }

    let changed_password = update.hashed_password.is_some();
    let user = users::update_user(conn, user_id, update)
        .await
        .map_err(|e| match AppError::from(e) {
            AppError::NotFound { .. } => user_not_found(),
            other => other,
        })?;

    info!(user_id = %user.id, changed_password, "user updated");
    Ok(user)
}

/// Delete the account and all of its todos.
pub async fn delete_account<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: &str,
) -> Result<(), AppError> {
    if !users::delete_user(conn, user_id).await? {
        return Err(user_not_found());
    }
    info!(user_id, "user deleted");
    Ok(())
}
