// crates/backend-lib/src/error.rs

//! Central error type + Axum integration.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::store::StoreError;

/// Application error types with error codes and context
#[derive(Error, Debug)]
pub enum AppError {
    /// A required request field was empty
    #[error("Field must not be empty: {0}")]
    EmptyField(&'static str),

    /// A request field exceeded its maximum length
    #[error("Field too long: {field} (max {max} bytes)")]
    FieldTooLong { field: &'static str, max: usize },

    /// Registration attempted with a username that already exists
    #[error("Username already taken")]
    UsernameTaken,

    /// Credential mismatch or unknown identity. Deliberately a single
    /// variant: callers must not be able to tell the two apart.
    #[error("Authentication failed")]
    AuthFailed,

    /// A protected resource was requested without a valid session
    #[error("No valid session")]
    SessionRequired,

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::EmptyField(_) | AppError::FieldTooLong { .. } => StatusCode::BAD_REQUEST,
            AppError::UsernameTaken => StatusCode::CONFLICT,
            AppError::AuthFailed | AppError::SessionRequired => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::EmptyField(_) => "VAL_001",
            AppError::FieldTooLong { .. } => "VAL_002",
            AppError::UsernameTaken => "VAL_003",
            AppError::AuthFailed => "AUTH_001",
            AppError::SessionRequired => "AUTH_002",
            AppError::Storage(_) => "STORE_001",
            AppError::Internal(_) => "INT_001",
        }
    }

    /// Get a sanitized message suitable for production use
    pub fn sanitized_message(&self) -> String {
        match self {
            // Validation problems are caller-correctable and safe to echo
            AppError::EmptyField(field) => format!("{field} must not be empty"),
            AppError::FieldTooLong { field, max } => {
                format!("{field} cannot exceed {max} bytes")
            },
            AppError::UsernameTaken => {
                "Username already exists. Please choose a different one.".to_string()
            },
            // One message for unknown user and wrong password
            AppError::AuthFailed => "Invalid username or password.".to_string(),
            AppError::SessionRequired => "Please log in to access this resource.".to_string(),
            // Never leak backing-store diagnostics to the client
            AppError::Storage(_) | AppError::Internal(_) => {
                "An internal server error occurred".to_string()
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();

        // Internal detail goes to the log, not the wire
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(code = error_code, error = %self, "request failed");
        }

        let body = serde_json::json!({
            "error": {
                "code": error_code,
                "message": self.sanitized_message(),
            }
        });

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use std::io::{Error as IoError, ErrorKind};

    #[test]
    fn test_app_error_display() {
        assert_eq!(AppError::AuthFailed.to_string(), "Authentication failed");
        assert_eq!(AppError::UsernameTaken.to_string(), "Username already taken");
        assert_eq!(
            AppError::EmptyField("username").to_string(),
            "Field must not be empty: username"
        );
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            AppError::EmptyField("username").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::UsernameTaken.status_code(), StatusCode::CONFLICT);
        assert_eq!(AppError::AuthFailed.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::SessionRequired.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::Internal("test".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Storage(StoreError::Io(IoError::new(
                ErrorKind::ConnectionRefused,
                "down"
            )))
            .status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_app_error_error_codes() {
        assert_eq!(AppError::AuthFailed.error_code(), "AUTH_001");
        assert_eq!(AppError::SessionRequired.error_code(), "AUTH_002");
        assert_eq!(AppError::UsernameTaken.error_code(), "VAL_003");
        assert_eq!(AppError::Internal("test".to_string()).error_code(), "INT_001");
    }

    #[test]
    fn test_auth_failed_and_unknown_user_share_one_message() {
        // Unknown user and wrong password both surface AuthFailed, so the
        // sanitized message must not differ between the two paths.
        assert_eq!(
            AppError::AuthFailed.sanitized_message(),
            "Invalid username or password."
        );
    }

    #[test]
    fn test_storage_error_is_sanitized() {
        let err = AppError::Storage(StoreError::Io(IoError::new(
            ErrorKind::ConnectionRefused,
            "connection refused (10.0.0.5:5432)",
        )));
        let msg = err.sanitized_message();
        assert!(!msg.contains("10.0.0.5"));
        assert_eq!(msg, "An internal server error occurred");
    }

    #[test]
    fn test_app_error_into_response() {
        let response = AppError::UsernameTaken.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let response_headers = response.headers();
        assert!(response_headers
            .get("content-type")
            .unwrap()
            .to_str()
            .unwrap()
            .contains("application/json"));
    }
}
