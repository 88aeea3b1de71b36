/**
 * Get Current User Handler
 *
 * GET /api/me
 *
 * Requires a session (`AuthUser`). Returns the stored user rather than the
 * token claims, so a deleted account stops resolving even while its token is
 * still within `exp`.
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::handlers::types::UserResponse;
use crate::backend::auth::users::{with_timeout, CredentialStore};
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;

/// Get current user handler
///
/// # Errors
///
/// * `401 Unauthorized` - no valid session, or the user no longer exists
/// * `500 Internal Server Error` - credential store failure
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
) -> Result<Json<UserResponse>, BackendError> {
    let user = with_timeout(
        state.config.store_timeout,
        state.store.find_by_id(identity.user_id),
    )
    .await?
    .ok_or_else(|| {
        tracing::warn!("Session refers to missing user: {}", identity.user_id);
        BackendError::Unauthenticated
    })?;

    Ok(Json(UserResponse::from(&user)))
}
