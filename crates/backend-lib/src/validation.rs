// ============================
// crates/backend-lib/src/validation.rs
// ============================
//! Request field validation.
//!
//! Registration accepts any non-empty username and password up to the
//! length caps below; uniqueness is the store's job, not validation's.

use crate::error::AppError;

/// Maximum username length in bytes (the account table's column width)
pub const MAX_USERNAME_LENGTH: usize = 80;
/// Maximum plaintext password length in bytes
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, AppError>;

/// Validate a username field
pub fn validate_username(username: &str) -> ValidationResult<&str> {
    if username.is_empty() {
        return Err(AppError::EmptyField("username"));
    }

    if username.len() > MAX_USERNAME_LENGTH {
        return Err(AppError::FieldTooLong {
            field: "username",
            max: MAX_USERNAME_LENGTH,
        });
    }

    Ok(username)
}

/// Validate a password field
pub fn validate_password(password: &str) -> ValidationResult<&str> {
    if password.is_empty() {
        return Err(AppError::EmptyField("password"));
    }

    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(AppError::FieldTooLong {
            field: "password",
            max: MAX_PASSWORD_LENGTH,
        });
    }

    Ok(password)
}

/// Validate both credential fields of a register or login request
pub fn validate_credentials<'a>(
    username: &'a str,
    password: &'a str,
) -> ValidationResult<(&'a str, &'a str)> {
    Ok((validate_username(username)?, validate_password(password)?))
}
