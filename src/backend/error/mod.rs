//! Backend Error Module
//!
//! Error types returned by HTTP handlers and extractors, and their
//! conversion into JSON responses.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - IntoResponse implementation
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use sessiongate::backend::error::BackendError;
//! use axum::response::Response;
//!
//! # async fn example() -> Result<Response, BackendError> {
//! Err(BackendError::Unauthenticated)
//! # }
//! ```

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::BackendError;
