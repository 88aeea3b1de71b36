/**
 * API Routes
 *
 * ## Authentication
 * - `POST /api/register` - User registration
 * - `POST /api/login` - Credential check, sets the session cookie
 * - `POST /api/logout` - Clears the session cookie
 * - `GET /api/me` - Current user (requires a session)
 */

use axum::{
    routing::{get, post},
    Router,
};

use crate::backend::auth::{get_me, login, logout, register};
use crate::backend::server::state::AppState;

/// Configure API routes
///
/// Only `/api/me` needs a session, enforced by its `AuthUser` extractor; the
/// others are public.
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/api/register", post(register))
        .route("/api/login", post(login))
        .route("/api/logout", post(logout))
        .route("/api/me", get(get_me))
}
