/**
 * Backend Error Types
 *
 * Every failure a handler can return, and how each one is presented to the
 * client. Authentication failures are deliberately uniform: an unknown
 * email, a wrong password and a corrupt stored hash all become
 * `AuthenticationFailed`. Infrastructure failures carry their detail for the
 * log but surface as an opaque 500.
 *
 * # Status Code Mapping
 *
 * - `Validation` - 400, with one message per failing field
 * - `AuthenticationFailed` - 401 "Authentication failed"
 * - `Unauthenticated` - 401 "Authentication required"
 * - `RegistrationFailed` - 400 "Registration failed"
 * - `StoreUnavailable`, `Internal` - 500 "Internal server error"
 * - `HandlerError` - whatever status it was built with
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::auth::sessions::TokenError;
use crate::backend::auth::users::StoreError;
use crate::shared::validation::FieldViolation;
use crate::shared::SharedError;

pub const AUTHENTICATION_FAILED: &str = "Authentication failed";
pub const AUTHENTICATION_REQUIRED: &str = "Authentication required";
pub const REGISTRATION_FAILED: &str = "Registration failed";
pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";

/// Backend-specific error types
///
/// ```rust
/// use sessiongate::backend::error::BackendError;
/// use axum::http::StatusCode;
///
/// let err = BackendError::handler(StatusCode::BAD_REQUEST, "Invalid request");
/// assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error with an explicit status
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Request payload failed validation
    #[error("Validation failed")]
    Validation {
        violations: Vec<FieldViolation>,
    },

    /// Login rejected: unknown email, wrong password, or unusable stored hash
    #[error("Authentication failed")]
    AuthenticationFailed,

    /// A protected route was reached without a valid session
    #[error("Authentication required")]
    Unauthenticated,

    /// Registration rejected without saying why
    #[error("Registration failed")]
    RegistrationFailed,

    /// Credential store failed or timed out
    #[error("Credential store unavailable: {0}")]
    StoreUnavailable(StoreError),

    /// Any other server-side failure
    #[error("Internal error during {operation}")]
    Internal {
        /// What the server was doing when it failed
        operation: String,
    },
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    pub fn internal(operation: impl Into<String>) -> Self {
        Self::Internal {
            operation: operation.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::AuthenticationFailed | Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::RegistrationFailed => StatusCode::BAD_REQUEST,
            Self::StoreUnavailable(_) | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message. Never includes internal detail.
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::Validation { .. } => "Validation failed".to_string(),
            Self::AuthenticationFailed => AUTHENTICATION_FAILED.to_string(),
            Self::Unauthenticated => AUTHENTICATION_REQUIRED.to_string(),
            Self::RegistrationFailed => REGISTRATION_FAILED.to_string(),
            Self::StoreUnavailable(_) | Self::Internal { .. } => INTERNAL_SERVER_ERROR.to_string(),
        }
    }

    /// Per-field messages, e.g. `"Email is email"`; empty for other variants.
    pub fn field_errors(&self) -> Vec<String> {
        match self {
            Self::Validation { violations } => {
                violations.iter().map(ToString::to_string).collect()
            }
            _ => Vec::new(),
        }
    }

    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }
}

impl From<SharedError> for BackendError {
    fn from(err: SharedError) -> Self {
        match err {
            SharedError::ValidationError { violations } => Self::Validation { violations },
            SharedError::SerializationError { message } => {
                Self::handler(StatusCode::BAD_REQUEST, message)
            }
        }
    }
}

impl From<StoreError> for BackendError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail => Self::RegistrationFailed,
            other => Self::StoreUnavailable(other),
        }
    }
}

impl From<TokenError> for BackendError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Invalid | TokenError::Expired => Self::Unauthenticated,
            TokenError::Signing(_) => Self::internal("token signing"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::validation::Constraint;
    use assert_matches::assert_matches;
    use std::time::Duration;

    #[test]
    fn test_handler_error() {
        let error = BackendError::handler(StatusCode::BAD_REQUEST, "Invalid request");
        match error {
            BackendError::HandlerError { status, message } => {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert_eq!(message, "Invalid request");
            }
            _ => panic!("Expected HandlerError"),
        }
    }

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(BackendError::AuthenticationFailed.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(BackendError::Unauthenticated.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(BackendError::RegistrationFailed.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            BackendError::internal("hashing").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            BackendError::Validation { violations: vec![] }.status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_store_errors_are_opaque() {
        let error: BackendError = StoreError::Timeout(Duration::from_secs(5)).into();
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.message(), "Internal server error");
        assert!(error.to_string().contains("5s"));
    }

    #[test]
    fn test_duplicate_email_maps_to_registration_failed() {
        let error: BackendError = StoreError::DuplicateEmail.into();
        assert_matches!(error, BackendError::RegistrationFailed);
        assert_eq!(error.message(), "Registration failed");
    }

    #[test]
    fn test_token_errors_are_indistinguishable() {
        let invalid: BackendError = TokenError::Invalid.into();
        let expired: BackendError = TokenError::Expired.into();
        assert_eq!(invalid.status_code(), expired.status_code());
        assert_eq!(invalid.message(), expired.message());
    }

    #[test]
    fn test_validation_field_errors() {
        let shared = SharedError::validation(vec![
            FieldViolation::new("Email", Constraint::Email),
            FieldViolation::new("Password", Constraint::Min),
        ]);
        let error: BackendError = shared.into();
        assert_eq!(error.field_errors(), vec!["Email is email", "Password is min"]);
    }
}
