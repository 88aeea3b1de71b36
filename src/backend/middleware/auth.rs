/**
 * Session Middleware
 *
 * Runs on every request. Looks for a session token in the session cookie
 * (falling back to `Authorization: Bearer`), verifies it, and stores a
 * `SessionContext` in the request extensions. The middleware never rejects a
 * request: a missing, invalid or expired token just yields an anonymous
 * context. Routes that need a user ask for one with the `AuthUser`
 * extractor.
 */

use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::backend::auth::cookies::extract_token;
use crate::backend::auth::sessions::TokenService;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

/// The user a verified token belongs to
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SessionIdentity {
    pub user_id: Uuid,
    pub email: String,
    pub expires_at: DateTime<Utc>,
}

/// Per-request authentication outcome, read-only once built
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionContext {
    identity: Option<SessionIdentity>,
}

impl SessionContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(identity: SessionIdentity) -> Self {
        Self {
            identity: Some(identity),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    pub fn identity(&self) -> Option<&SessionIdentity> {
        self.identity.as_ref()
    }
}

/// Build the session context for a set of request headers.
pub fn resolve_session(tokens: &TokenService, headers: &HeaderMap, cookie_name: &str) -> SessionContext {
    let Some(token) = extract_token(headers, cookie_name) else {
        return SessionContext::anonymous();
    };

    match tokens.verify(&token) {
        Ok(claims) => match claims.expires_at() {
            Some(expires_at) => SessionContext::authenticated(SessionIdentity {
                user_id: claims.sub,
                email: claims.email,
                expires_at,
            }),
            None => {
                tracing::debug!("Session token has an unrepresentable expiry");
                SessionContext::anonymous()
            }
        },
        Err(e) => {
            tracing::debug!("Ignoring session token: {}", e);
            SessionContext::anonymous()
        }
    }
}

/// Session middleware
///
/// Attach with `axum::middleware::from_fn_with_state(state, session_middleware)`.
pub async fn session_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let context = resolve_session(
        &app_state.tokens,
        request.headers(),
        &app_state.config.cookie_name,
    );
    request.extensions_mut().insert(context);
    next.run(request).await
}

/// Extractor for the current session, authenticated or not
#[derive(Clone, Debug)]
pub struct Session(pub SessionContext);

impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Session(
            parts
                .extensions
                .get::<SessionContext>()
                .cloned()
                .unwrap_or_default(),
        ))
    }
}

/// Extractor for routes that require a signed-in user
///
/// Rejects anonymous requests with 401 "Authentication required".
#[derive(Clone, Debug)]
pub struct AuthUser(pub SessionIdentity);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionContext>()
            .and_then(SessionContext::identity)
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| {
                tracing::debug!("Rejecting anonymous request to protected route");
                BackendError::Unauthenticated
            })
    }
}
