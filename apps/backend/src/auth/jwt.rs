use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::logging::security;
use crate::state::security_config::SecurityConfig;
use crate::AppError;

/// Claims carried by our access tokens.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// User id (users.id); stable across renames
    pub sub: String,
    /// Username at the time of issue, informational only
    pub username: String,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}

/// Mint an access token for `user_id` that expires after the configured TTL.
pub fn mint_access_token(
    user_id: &str,
    username: &str,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    let iat = now
        .duration_since(UNIX_EPOCH)
        .map_err(|_| AppError::internal("Failed to get current time"))?
        .as_secs() as i64;
    let exp = iat + security.access_token_ttl.whole_seconds();

    let claims = Claims {
        sub: user_id.to_string(),
        username: username.to_string(),
        iat,
        exp,
    };

    encode(
        &Header::new(security.algorithm),
        &claims,
        &EncodingKey::from_secret(&security.jwt_secret),
    )
    .map_err(|e| AppError::internal(format!("Failed to encode JWT: {e}")))
}

/// Verify a token and return its claims.
///
/// The algorithm is pinned to the configured one; `exp` is required.
/// Expired tokens map to `UNAUTHORIZED_EXPIRED_JWT`, everything else to
/// `UNAUTHORIZED_INVALID_JWT`.
pub fn verify_access_token(token: &str, security: &SecurityConfig) -> Result<Claims, AppError> {
    let validation = Validation::new(security.algorithm);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(&security.jwt_secret),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => {
            security::token_rejected("token_expired");
            AppError::unauthorized_expired_jwt()
        }
        ErrorKind::InvalidSignature => {
            security::token_rejected("invalid_signature");
            AppError::unauthorized_invalid_jwt()
        }
        _ => {
            security::token_rejected("invalid_token");
            AppError::unauthorized_invalid_jwt()
        }
    })
}
