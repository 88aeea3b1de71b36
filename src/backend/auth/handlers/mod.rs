//! Authentication Handlers Module
//!
//! HTTP handlers for the authentication endpoints.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs       - Module exports and documentation
//! ├── types.rs     - Request and response types
//! ├── register.rs  - User registration handler
//! ├── login.rs     - Credential check, token issue, session cookie
//! ├── logout.rs    - Session cookie removal
//! └── me.rs        - Get current user handler
//! ```
//!
//! # Handlers
//!
//! - **`register`** - POST /api/register
//! - **`login`** - POST /api/login
//! - **`logout`** - POST /api/logout
//! - **`get_me`** - GET /api/me (requires a session)
//!
//! # Example
//!
//! ```rust,ignore
//! use sessiongate::backend::auth::handlers::{get_me, login, logout, register};
//! use axum::{routing::{get, post}, Router};
//!
//! let router = Router::new()
//!     .route("/api/register", post(register))
//!     .route("/api/login", post(login))
//!     .route("/api/logout", post(logout))
//!     .route("/api/me", get(get_me));
//! ```

/// Request and response types
pub mod types;

/// Register handler
pub mod register;

/// Login handler
pub mod login;

/// Logout handler
pub mod logout;

/// Get current user handler
pub mod me;

// Re-export commonly used types
pub use types::{Credentials, MessageResponse, UserResponse, HX_REDIRECT};

// Re-export handlers
pub use login::login;
pub use logout::logout;
pub use me::get_me;
pub use register::register;
