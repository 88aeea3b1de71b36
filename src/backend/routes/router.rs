/**
 * Router Configuration
 *
 * Assembles the site routes, the API routes and static file serving into a
 * single router, then wraps everything in the session middleware (so every
 * handler can read a `SessionContext`) and a request trace layer.
 */

use std::path::Path;

use axum::{middleware::from_fn_with_state, Router};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::backend::middleware::session_middleware;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::routes::site_routes::configure_site_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// - `GET /`, `GET /healthcheck` - site routes
/// - `/api/*` - authentication API
/// - `/static/*` - files under `static_dir`
pub fn create_router(app_state: AppState, static_dir: &Path) -> Router<()> {
    let router = configure_site_routes(Router::new());
    let router = configure_api_routes(router);

    router
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(from_fn_with_state(app_state.clone(), session_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
