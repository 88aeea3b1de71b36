//! Authentication Module
//!
//! Registration, login and logout, plus the pieces they are built from:
//! password hashing, signing keys, session tokens, the session cookie and the
//! credential store.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── password.rs     - bcrypt hashing and verification
//! ├── keys.rs         - RS256 / EdDSA key pair loading
//! ├── sessions.rs     - Session claims, token issue and verify
//! ├── cookies.rs      - Set-Cookie values and token extraction
//! ├── users.rs        - User model and credential stores
//! └── handlers/       - HTTP handlers
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Register**: validate → hash → atomic insert → 201 with the new user
//! 2. **Login**: validate → look up → verify password → issue token → set cookie
//! 3. **Every request**: the session middleware verifies the cookie and
//!    attaches a `SessionContext`; it never rejects
//! 4. **Logout**: overwrite the cookie with an expired, empty one
//!
//! # Security
//!
//! - Passwords are hashed with bcrypt; the hash never leaves the store
//! - Tokens are signed with an asymmetric key pair and expire with the cookie
//! - Every credential failure at login returns the same 401 body
//! - Logout is client-side only; a captured token lives until its `exp`

/// Password hashing
pub mod password;

/// Signing key material
pub mod keys;

/// Session token issue and verification
pub mod sessions;

/// Session cookie handling
pub mod cookies;

/// User data model and credential stores
pub mod users;

/// HTTP handlers for authentication endpoints
pub mod handlers;

// Re-export commonly used types and handlers
pub use handlers::{get_me, login, logout, register};
pub use keys::{KeyError, KeyPair, SigningAlgorithm};
pub use password::{PasswordError, PasswordHasher};
pub use sessions::{SessionClaims, TokenError, TokenService, TokenVerifier};
pub use users::{CredentialStore, InMemoryCredentialStore, PgCredentialStore, StoreError, User};
