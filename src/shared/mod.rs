//! Shared Module
//!
//! Platform-agnostic types used by the server and by anything that talks to
//! it: credential payloads and their validation rules, the authentication
//! configuration, and the errors those raise.
//!
//! Nothing in here depends on the `ssr` feature.

/// Shared error types
pub mod error;

/// Credential payloads and validation rules
pub mod validation;

/// Authentication configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use config::{AuthConfig, AuthConfigBuilder, AuthSettings, ConfigError};
pub use error::SharedError;
pub use validation::{Constraint, Credentials, FieldViolation, PasswordPolicy};
