//! Unique test data, so tests sharing a database never collide.

use ulid::Ulid;

/// `{prefix}-{ulid}`
///
/// ```
/// use backend_test_support::unique_helpers::unique_str;
///
/// let a = unique_str("user");
/// assert_ne!(a, unique_str("user"));
/// assert!(a.starts_with("user-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// `{prefix}-{ulid}@example.test`
pub fn unique_email(prefix: &str) -> String {
    format!("{}-{}@example.test", prefix, Ulid::new())
}

/// A username that fits the 50-character limit: `{prefix}_{ulid}` with the
/// prefix cut to 20 characters.
pub fn unique_username(prefix: &str) -> String {
    let prefix: String = prefix.chars().take(20).collect();
    format!("{}_{}", prefix, Ulid::new().to_string().to_lowercase())
}
