use bcrypt::{hash, verify};

use crate::AppError;

/// Hash `password` with bcrypt and a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, cost()).map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))
}

/// Check `password` against a stored bcrypt hash.
///
/// A malformed stored hash verifies as `false`.
pub fn verify_password(password: &str, hashed: &str) -> bool {
    verify(password, hashed).unwrap_or(false)
}

// Unit tests hash a lot of passwords; the minimum cost keeps them fast.
#[cfg(test)]
fn cost() -> u32 {
    4
}

#[cfg(not(test))]
fn cost() -> u32 {
    bcrypt::DEFAULT_COST
}
