/**
 * Logout Handler
 *
 * POST /api/logout
 *
 * Overwrites the session cookie with an empty, already-expired one. No
 * server-side state is touched, so a token captured before logout stays
 * valid until its own `exp`.
 */
use std::sync::Arc;

use axum::{
    extract::State,
    http::header::SET_COOKIE,
    response::{IntoResponse, Json},
};

use crate::backend::auth::cookies::cleared_cookie;
use crate::backend::auth::handlers::types::{MessageResponse, HX_REDIRECT};
use crate::backend::middleware::Session;
use crate::shared::AuthConfig;

pub async fn logout(
    State(config): State<Arc<AuthConfig>>,
    Session(session): Session,
) -> impl IntoResponse {
    if let Some(identity) = session.identity() {
        tracing::info!("User logged out: {} ({})", identity.email, identity.user_id);
    }

    (
        [
            (SET_COOKIE, cleared_cookie(&config)),
            (HX_REDIRECT, config.redirect_to.clone()),
        ],
        Json(MessageResponse::new("Logout successful")),
    )
}
