/**
 * Request and Response Types
 *
 * Register and login both take a `Credentials` body (`{email, password}`);
 * it lives in `shared::validation` next to the rules that check it.
 */

use axum::http::HeaderName;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::backend::auth::users::User;

pub use crate::shared::validation::Credentials;

/// Header that tells an htmx client where to navigate next.
pub const HX_REDIRECT: HeaderName = HeaderName::from_static("hx-redirect");

/// Public view of a user; never includes the password hash
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
