/**
 * Site Routes
 *
 * Endpoints outside `/api`:
 *
 * - `GET /` - summary of the caller's session; never requires one
 * - `GET /healthcheck` - liveness probe, always `OK`
 */

use axum::{response::Json, routing::get, Router};
use serde::Serialize;

use crate::backend::middleware::{Session, SessionIdentity};
use crate::backend::server::state::AppState;

#[derive(Debug, Serialize)]
pub struct SessionSummary {
    pub authenticated: bool,
    pub user: Option<SessionIdentity>,
}

pub async fn home(Session(session): Session) -> Json<SessionSummary> {
    Json(SessionSummary {
        authenticated: session.is_authenticated(),
        user: session.identity().cloned(),
    })
}

pub async fn healthcheck() -> &'static str {
    "OK"
}

pub fn configure_site_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/", get(home))
        .route("/healthcheck", get(healthcheck))
}
