//! Server Module
//!
//! Configuration loading, application state and app assembly.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── state.rs        - AppState and FromRef implementations
//! ├── config.rs       - ServerConfig from TOML file and environment
//! └── init.rs         - Key loading, store selection, router creation
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Configuration**: `ServerConfig::from_env()`
//! 2. **Keys**: load and probe the signing key pair
//! 3. **Store**: PostgreSQL with migrations, or in-memory
//! 4. **Router**: routes, session middleware, tracing
//!
//! # Example
//!
//! ```rust,no_run
//! use sessiongate::backend::server::{config::ServerConfig, create_app};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let app = create_app(&config).await?;
//! # Ok(())
//! # }
//! ```

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

// Re-export commonly used types
pub use config::ServerConfig;
pub use init::{create_app, InitError};
pub use state::AppState;
