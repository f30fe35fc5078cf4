use std::time::SystemTime;

use sea_orm::ConnectionTrait;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::mint_access_token;
use crate::auth::password::verify_password;
use crate::error::AppError;
use crate::logging::security;
use crate::repos::users::{self, User};
use crate::state::security_config::SecurityConfig;

/// OAuth2 password-grant form fields.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// The user, if `username` exists and `password` matches. Unknown user and
/// wrong password are indistinguishable to the caller.
pub async fn authenticate<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    username: &str,
    password: &str,
) -> Result<Option<User>, AppError> {
    let user = match users::find_by_username(conn, username).await? {
        Some(user) => user,
        None => {
            security::login_failed("unknown_user", username);
            return Ok(None);
        }
    };

    if !verify_password(password, &user.hashed_password) {
        security::login_failed("bad_password", username);
        return Ok(None);
    }
    Ok(Some(user))
}

/// Authenticate and mint a bearer token.
pub async fn login<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    security: &SecurityConfig,
    form: &LoginForm,
) -> Result<TokenResponse, AppError> {
    let user = authenticate(conn, &form.username, &form.password)
        .await?
        .ok_or_else(AppError::invalid_credentials)?;

    let access_token = mint_access_token(&user.id, &user.username, SystemTime::now(), security)?;
    Ok(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    })
}
