//! Middleware Module
//!
//! HTTP middleware and the extractors that read what it leaves behind.
//!
//! - **`auth`** - fail-open session resolution, plus the `Session` and
//!   `AuthUser` extractors
//!
//! # Example
//!
//! ```rust,ignore
//! use axum::middleware::from_fn_with_state;
//! use sessiongate::backend::middleware::session_middleware;
//!
//! let router = router.layer(from_fn_with_state(state.clone(), session_middleware));
//! ```

pub mod auth;

pub use auth::{resolve_session, session_middleware, AuthUser, Session, SessionContext, SessionIdentity};
