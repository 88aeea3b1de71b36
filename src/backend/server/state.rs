/**
 * Application State Management
 *
 * `AppState` is the single state container handed to the router. Everything
 * in it is either immutable after startup (token service, hasher,
 * configuration) or synchronizes itself (the credential store), so handlers
 * never take a lock on the state as a whole.
 *
 * The `FromRef` implementations let handlers and extractors pull out just the
 * part they need, e.g. `State<Arc<AuthConfig>>`.
 */

use std::sync::Arc;

use axum::extract::FromRef;

use crate::backend::auth::password::PasswordHasher;
use crate::backend::auth::sessions::TokenService;
use crate::backend::auth::users::CredentialStore;
use crate::shared::AuthConfig;

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    /// Persistence for user identities
    pub store: Arc<dyn CredentialStore>,

    /// Token issue/verify with the process-wide key pair
    pub tokens: Arc<TokenService>,

    /// bcrypt with the configured cost
    pub hasher: PasswordHasher,

    /// Hash checked against when a login names no account
    pub decoy_hash: Arc<str>,

    /// Password policy, session lifetime, cookie attributes
    pub config: Arc<AuthConfig>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn CredentialStore>,
        tokens: Arc<TokenService>,
        config: AuthConfig,
    ) -> Self {
        let hasher = PasswordHasher::new(config.bcrypt_cost);
        let decoy_hash = hasher.decoy_hash().unwrap_or_else(|e| {
            tracing::warn!("Failed to prepare decoy password hash: {}", e);
            String::new()
        });

        Self {
            store,
            tokens,
            hasher,
            decoy_hash: decoy_hash.into(),
            config: Arc::new(config),
        }
    }
}

impl FromRef<AppState> for Arc<AuthConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}

impl FromRef<AppState> for Arc<TokenService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.tokens.clone()
    }
}

impl FromRef<AppState> for Arc<dyn CredentialStore> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.store.clone()
    }
}
