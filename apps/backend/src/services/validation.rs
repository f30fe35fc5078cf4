//! Input rules shared by the user and todo services.

use lazy_regex::regex_is_match;

use crate::entities::todos::TodoState;
use crate::errors::domain::{DomainError, ValidationKind};

pub const USERNAME_MAX_CHARS: usize = 50;
pub const EMAIL_MAX_CHARS: usize = 100;
// bcrypt only looks at the first 72 bytes.
pub const PASSWORD_MAX_BYTES: usize = 72;
pub const TITLE_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MAX_CHARS: usize = 500;

/// Trimmed username, 1..=50 characters.
pub fn username(raw: &str) -> Result<String, DomainError> {
    let value = raw.trim();
    let len = value.chars().count();
    if len == 0 || len > USERNAME_MAX_CHARS {
        return Err(DomainError::validation(
            ValidationKind::Username,
            format!("Username must be between 1 and {USERNAME_MAX_CHARS} characters"),
        ));
    }
    Ok(value.to_string())
}

/// Trimmed email of shape `local@domain.tld`, at most 100 characters.
pub fn email(raw: &str) -> Result<String, DomainError> {
    let value = raw.trim();
    if value.chars().count() > EMAIL_MAX_CHARS
        || !regex_is_match!(r"^[^@\s]+@[^@\s.]+(\.[^@\s.]+)+$", value)
    {
        return Err(DomainError::validation(
            ValidationKind::Email,
            "Email must be a valid address of at most 100 characters",
        ));
    }
    Ok(value.to_string())
}

/// Non-empty, at most 72 bytes. Not trimmed.
pub fn password(raw: &str) -> Result<(), DomainError> {
    if raw.is_empty() || raw.len() > PASSWORD_MAX_BYTES {
        return Err(DomainError::validation(
            ValidationKind::Password,
            format!("Password must be between 1 and {PASSWORD_MAX_BYTES} bytes"),
        ));
    }
    Ok(())
}

/// Trimmed title, 1..=100 characters.
pub fn title(raw: &str) -> Result<String, DomainError> {
    let value = raw.trim();
    let len = value.chars().count();
    if len == 0 || len > TITLE_MAX_CHARS {
        return Err(DomainError::validation(
            ValidationKind::Title,
            format!("Title must be between 1 and {TITLE_MAX_CHARS} characters"),
        ));
    }
    Ok(value.to_string())
}

pub fn description(raw: &str) -> Result<(), DomainError> {
    if raw.chars().count() > DESCRIPTION_MAX_CHARS {
        return Err(DomainError::validation(
            ValidationKind::Description,
            format!("Description must be at most {DESCRIPTION_MAX_CHARS} characters"),
        ));
    }
    Ok(())
}

pub fn state(raw: &str) -> Result<TodoState, DomainError> {
    match raw {
        "pendiente" => Ok(TodoState::Pendiente),
        "en_progreso" => Ok(TodoState::EnProgreso),
        "completado" => Ok(TodoState::Completado),
        other => Err(DomainError::validation(
            ValidationKind::State,
            format!("Unknown state '{other}'; expected pendiente, en_progreso or completado"),
        )),
    }
}
