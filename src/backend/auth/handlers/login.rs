/**
 * Login Handler
 *
 * POST /api/login
 *
 * # Authentication Process
 *
 * 1. Check the payload shape (email grammar, password present and not over
 *    the maximum length)
 * 2. Look up the user by email
 * 3. Verify the password with bcrypt on the blocking pool
 * 4. Issue a session token and set it as the session cookie
 *
 * # Security
 *
 * - Unknown email, wrong password and an unusable stored hash all return the
 *   same 401 body
 * - An unknown email still pays for one bcrypt verification
 * - The password is never logged
 */
use axum::{
    extract::State,
    http::header::SET_COOKIE,
    response::{IntoResponse, Json, Response},
};
use chrono::Utc;

use crate::backend::auth::cookies::session_cookie;
use crate::backend::auth::handlers::types::{Credentials, MessageResponse, HX_REDIRECT};
use crate::backend::auth::password::PasswordError;
use crate::backend::auth::users::{with_timeout, CredentialStore};
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::shared::validation::validate_login;

/// Login handler
///
/// On success responds `200 {"message": "Login successful"}` with
/// `Set-Cookie: token=...` and `HX-Redirect: /`.
///
/// # Errors
///
/// * `400 Bad Request` - payload shape is wrong
/// * `401 Unauthorized` - "Authentication failed", for any credential problem
/// * `500 Internal Server Error` - store or signing failure
pub async fn login(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<Response, BackendError> {
    validate_login(&credentials, &state.config.password_policy)?;

    let email = credentials.normalized_email();

    let user = with_timeout(state.config.store_timeout, state.store.find_by_email(&email))
        .await
        .map_err(|e| {
            tracing::error!("Failed to look up user: {}", e);
            BackendError::from(e)
        })?;

    let Some(user) = user else {
        // Same bcrypt work as a real account, so timing does not reveal it.
        state
            .hasher
            .verify_blocking(state.decoy_hash.to_string(), credentials.password)
            .await
            .ok();
        tracing::warn!("Login failed, no such user: {}", email);
        return Err(BackendError::AuthenticationFailed);
    };

    match state
        .hasher
        .verify_blocking(user.password_hash.clone(), credentials.password)
        .await
    {
        Ok(()) => {}
        Err(PasswordError::Mismatch) => {
            tracing::warn!("Login failed, wrong password for: {}", user.email);
            return Err(BackendError::AuthenticationFailed);
        }
        Err(e) => {
            tracing::error!("Password verification failed for {}: {}", user.id, e);
            return Err(BackendError::AuthenticationFailed);
        }
    }

    let token = state.tokens.issue(&user, state.config.session_ttl)?;
    let cookie = session_cookie(&state.config, &token, Utc::now());

    tracing::info!("User logged in: {} ({})", user.email, user.id);

    Ok((
        [
            (SET_COOKIE, cookie),
            (HX_REDIRECT, state.config.redirect_to.clone()),
        ],
        Json(MessageResponse::new("Login successful")),
    )
        .into_response())
}
