//! Route Configuration Module
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Router assembly and layers
//! ├── site_routes.rs  - Home page and health check
//! └── api_routes.rs   - Authentication API
//! ```
//!
//! # Layers
//!
//! Outermost first: `TraceLayer` (one span per request), then the session
//! middleware, then the route handlers.

/// Main router creation
pub mod router;

/// Home page and health check
pub mod site_routes;

/// API endpoints
pub mod api_routes;

pub use router::create_router;
