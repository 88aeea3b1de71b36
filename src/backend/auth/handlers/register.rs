/**
 * Register Handler
 *
 * POST /api/register
 *
 * 1. Validate email grammar and password length
 * 2. Hash the password off the async runtime
 * 3. Insert the user; the store rejects a taken email atomically
 * 4. Return the new user with 201
 *
 * A taken email yields the same generic "Registration failed" as any other
 * refusal, so the endpoint cannot be used to probe for accounts.
 */

use axum::{extract::State, http::StatusCode, response::Json};

use crate::backend::auth::handlers::types::{Credentials, UserResponse};
use crate::backend::auth::password::PasswordError;
use crate::backend::auth::users::{with_timeout, CredentialStore, StoreError};
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::shared::validation::{validate_registration, Constraint, FieldViolation};

/// Register handler
///
/// # Errors
///
/// * `400 Bad Request` - validation failed (`errors` lists each field) or
///   the email is already registered
/// * `500 Internal Server Error` - hashing or the credential store failed
///
/// # Example Request
///
/// ```http
/// POST /api/register HTTP/1.1
/// Content-Type: application/json
///
/// {"email": "user@example.com", "password": "password1"}
/// ```
///
/// # Example Response
///
/// ```json
/// {
///   "id": "123e4567-e89b-12d3-a456-426614174000",
///   "email": "user@example.com",
///   "created_at": "2024-01-01T00:00:00Z",
///   "updated_at": "2024-01-01T00:00:00Z"
/// }
/// ```
pub async fn register(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<(StatusCode, Json<UserResponse>), BackendError> {
    validate_registration(&credentials, &state.config.password_policy).map_err(|e| {
        tracing::debug!("Registration rejected: {}", e);
        e
    })?;

    let email = credentials.normalized_email();
    let password_hash = state
        .hasher
        .hash_blocking(credentials.password)
        .await
        .map_err(|e| match e {
            PasswordError::TooLong(_) => BackendError::Validation {
                violations: vec![FieldViolation::new("Password", Constraint::Max)],
            },
            other => {
                tracing::error!("Failed to hash password: {}", other);
                BackendError::internal("password hashing")
            }
        })?;

    let user = with_timeout(
        state.config.store_timeout,
        state.store.create(&email, &password_hash),
    )
    .await
    .map_err(|e| {
        match &e {
            StoreError::DuplicateEmail => {
                tracing::warn!("Registration attempted for existing email: {}", email)
            }
            other => tracing::error!("Failed to create user: {}", other),
        }
        BackendError::from(e)
    })?;

    tracing::info!("User registered: {} ({})", user.email, user.id);

    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}
