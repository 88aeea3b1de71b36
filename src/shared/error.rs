//! Shared Error Types
//!
//! Errors raised by the platform-agnostic types in `shared`, before any
//! server-side machinery is involved.
//!
//! # Error Categories
//!
//! - `SerializationError` - JSON serialization/deserialization failures
//! - `ValidationError` - credential shape failures, one violation per field
//!
//! # Usage
//!
//! ```rust
//! use sessiongate::shared::error::SharedError;
//! use sessiongate::shared::validation::{Constraint, FieldViolation};
//!
//! let error = SharedError::validation(vec![FieldViolation::new("Email", Constraint::Email)]);
//! assert_eq!(error.messages(), vec!["Email is email".to_string()]);
//! ```
use thiserror::Error;

use super::validation::FieldViolation;

/// Shared error types that can occur in both frontend and backend
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SharedError {
    /// JSON serialization or deserialization error
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Human-readable error message
        message: String,
    },

    /// One or more fields failed validation
    #[error("Validation failed: {}", join_violations(.violations))]
    ValidationError {
        /// Failures in field order
        violations: Vec<FieldViolation>,
    },
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl SharedError {
    /// Create a new serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::SerializationError {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(violations: Vec<FieldViolation>) -> Self {
        Self::ValidationError { violations }
    }

    /// Client-facing messages, e.g. `["Email is email"]`.
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::SerializationError { message } => vec![message.clone()],
            Self::ValidationError { violations } => {
                violations.iter().map(ToString::to_string).collect()
            }
        }
    }
}

/// Helper trait for converting serialization errors
impl From<serde_json::Error> for SharedError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(format!("JSON error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::validation::Constraint;

    #[test]
    fn test_serialization_error() {
        let error = SharedError::serialization("Invalid JSON");
        match error {
            SharedError::SerializationError { message } => {
                assert_eq!(message, "Invalid JSON");
            }
            _ => panic!("Expected SerializationError"),
        }
    }

    #[test]
    fn test_validation_error_display() {
        let error = SharedError::validation(vec![
            FieldViolation::new("Email", Constraint::Email),
            FieldViolation::new("Password", Constraint::Min),
        ]);
        assert_eq!(
            error.to_string(),
            "Validation failed: Email is email, Password is min"
        );
    }

    #[test]
    fn test_validation_messages() {
        let error = SharedError::validation(vec![FieldViolation::new(
            "Password",
            Constraint::Required,
        )]);
        assert_eq!(error.messages(), vec!["Password is required".to_string()]);
    }

    #[test]
    fn test_from_serde_error() {
        let invalid_json = "{ invalid json }";
        let result: Result<serde_json::Value, _> = serde_json::from_str(invalid_json);
        let serde_error = result.unwrap_err();
        let shared_error: SharedError = serde_error.into();

        match shared_error {
            SharedError::SerializationError { .. } => {}
            _ => panic!("Expected SerializationError from serde error"),
        }
    }
}
