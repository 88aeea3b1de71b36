//! sessiongate - Session Authentication Service
//!
//! An HTTP service that registers users by email and password, logs them in
//! with a signed session token carried in an HttpOnly cookie, and tells every
//! request whether it belongs to a signed-in user.
//!
//! # Module Structure
//!
//! - **`shared`** - Types that do not depend on the server runtime
//!   - Credentials and their validation rules
//!   - Auth configuration and its TOML settings
//!   - Error types
//!
//! - **`backend`** - Server-side code (only compiled with `ssr` feature)
//!   - Axum router, handlers and session middleware
//!   - bcrypt hashing, RS256/EdDSA session tokens
//!   - PostgreSQL and in-memory credential stores
//!
//! # Feature Flags
//!
//! - **`ssr`** (default) - enables the backend and its dependencies
//!
//! # Usage
//!
//! ```rust,no_run
//! use sessiongate::backend::server::{create_app, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let app = create_app(&config).await?;
//! // Serve `app` with axum::serve
//! # Ok(())
//! # }
//! ```
//!
//! # Endpoints
//!
//! | Method | Path            | Purpose                                  |
//! |--------|-----------------|------------------------------------------|
//! | GET    | `/`             | Session summary for the current request  |
//! | GET    | `/healthcheck`  | Liveness, always `OK`                    |
//! | GET    | `/static/*`     | Files under the configured static dir    |
//! | POST   | `/api/register` | Create an account                        |
//! | POST   | `/api/login`    | Check credentials, set the `token` cookie|
//! | POST   | `/api/logout`   | Clear the `token` cookie                 |
//! | GET    | `/api/me`       | The signed-in user (401 otherwise)       |

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;
