//! Backend Module
//!
//! Server-side code for sessiongate: the Axum HTTP server, the
//! authentication handlers, the session middleware and the credential store.
//!
//! This module is only compiled when the `ssr` feature is enabled.
//!
//! # Architecture
//!
//! - **`server`** - Configuration, application state, initialization
//! - **`routes`** - Route configuration and router assembly
//! - **`auth`** - Passwords, signing keys, session tokens, cookies, users
//! - **`middleware`** - Session resolution and extractors
//! - **`error`** - Backend error type and its HTTP mapping
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Binary entry point
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── auth/           - Authentication
//! ├── middleware/     - Request middleware
//! └── error/          - Error types
//! ```
//!
//! # State Management
//!
//! `AppState` holds the credential store, the token service, the password
//! hasher and the auth configuration. Everything in it is behind `Arc` and
//! cloned cheaply into each request; the stores synchronize internally.
//!
//! # Request Lifecycle
//!
//! 1. `TraceLayer` opens a span for the request
//! 2. The session middleware reads the `token` cookie (or a bearer header),
//!    verifies it and attaches a `SessionContext`; failures are anonymous,
//!    never rejections
//! 3. Handlers that need a user take `AuthUser`, which turns an anonymous
//!    request into a 401
//!
//! # Example
//!
//! ```rust,no_run
//! use sessiongate::backend::server::{create_app, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let app = create_app(&config).await?;
//! let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

/// Server setup and configuration
#[cfg(feature = "ssr")]
pub mod server;

/// Route configuration
#[cfg(feature = "ssr")]
pub mod routes;

/// Backend error types
#[cfg(feature = "ssr")]
pub mod error;

/// Authentication and user management
#[cfg(feature = "ssr")]
pub mod auth;

/// Middleware for request processing
#[cfg(feature = "ssr")]
pub mod middleware;

/// Re-export commonly used types
#[cfg(feature = "ssr")]
pub use error::BackendError;
#[cfg(feature = "ssr")]
pub use server::{create_app, AppState, ServerConfig};
