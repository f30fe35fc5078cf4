use jsonwebtoken::Algorithm;
use time::Duration;

use crate::config::Settings;

/// JWT signing and verification settings
#[derive(Clone)]
pub struct SecurityConfig {
    /// Secret used for HMAC signing and verification
    pub jwt_secret: Vec<u8>,
    /// HS256, HS384 or HS512
    pub algorithm: Algorithm,
    /// Lifetime of freshly minted access tokens
    pub access_token_ttl: Duration,
}

impl SecurityConfig {
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            algorithm: Algorithm::HS256,
            access_token_ttl: Duration::minutes(30),
        }
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_ttl_minutes(mut self, minutes: i64) -> Self {
        self.access_token_ttl = Duration::minutes(minutes);
        self
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.secret_key.as_bytes())
            .with_algorithm(settings.algorithm)
            .with_ttl_minutes(settings.access_token_expire_minutes)
    }
}

impl std::fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("jwt_secret", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("access_token_ttl", &self.access_token_ttl)
            .finish()
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self::new(b"default_secret_for_tests_only".to_vec())
    }
}
