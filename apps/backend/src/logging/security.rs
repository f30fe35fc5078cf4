use tracing::warn;

use crate::logging::pii::Redacted;
use crate::trace_ctx;

/// Security event: a login attempt was rejected.
pub fn login_failed(reason: &str, username: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_LOGIN_FAILED",
        %trace_id,
        username = %Redacted(username),
        reason,
        "Authentication failure"
    );
}

/// Security event: a bearer token was rejected.
pub fn token_rejected(reason: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_TOKEN_REJECTED",
        %trace_id,
        reason,
        "Bearer token rejected"
    );
}

/// Security event: a request arrived with a Host header outside ALLOWED_HOSTS.
pub fn host_rejected(host: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_HOST_REJECTED",
        %trace_id,
        host,
        "Host header not allowed"
    );
}
