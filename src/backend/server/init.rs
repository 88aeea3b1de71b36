/**
 * Server Initialization
 *
 * Turns a `ServerConfig` into a ready-to-serve router:
 *
 * 1. Load and probe the signing key pair
 * 2. Open the credential store (PostgreSQL when `DATABASE_URL` is set,
 *    in-memory otherwise)
 * 3. Build `AppState`
 * 4. Assemble the router
 *
 * Unlike optional integrations, none of these steps is allowed to fail
 * quietly: a bad key or an unreachable database stops startup.
 */

use std::sync::Arc;

use axum::Router;
use thiserror::Error;

use crate::backend::auth::keys::KeyError;
use crate::backend::auth::sessions::TokenService;
use crate::backend::auth::users::{
    CredentialStore, InMemoryCredentialStore, PgCredentialStore, StoreError,
};
use crate::backend::routes::router::create_router;
use crate::backend::server::config::ServerConfig;
use crate::backend::server::state::AppState;
use crate::shared::ConfigError;

#[derive(Debug, Error)]
pub enum InitError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("signing keys: {0}")]
    Keys(#[from] KeyError),
    #[error("credential store: {0}")]
    Store(#[from] StoreError),
}

/// Open the credential store named by `database_url`.
pub async fn load_store(database_url: Option<&str>) -> Result<Arc<dyn CredentialStore>, StoreError> {
    match database_url {
        Some(url) => {
            tracing::info!("Connecting to database...");
            let store = PgCredentialStore::connect(url).await.map_err(|e| {
                tracing::error!("Failed to open database: {}", e);
                e
            })?;
            Ok(Arc::new(store))
        }
        None => {
            tracing::warn!("DATABASE_URL not set. Using in-memory credential store; accounts will not survive a restart.");
            Ok(Arc::new(InMemoryCredentialStore::new()))
        }
    }
}

/// Create and configure the Axum application
pub async fn create_app(config: &ServerConfig) -> Result<Router<()>, InitError> {
    tracing::info!("Initializing sessiongate server");

    let keys = config.load_keys().map_err(|e| {
        tracing::error!("Failed to load signing keys: {}", e);
        e
    })?;
    tracing::info!("Loaded {} signing key pair", keys.algorithm());

    let store = load_store(config.database_url.as_deref()).await?;
    let tokens = TokenService::new(Arc::new(keys), config.auth.token_leeway);
    let app_state = AppState::new(store, Arc::new(tokens), config.auth.clone());

    let app = create_router(app_state, &config.static_dir);
    tracing::info!("Router configured");

    Ok(app)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::auth::keys::SigningAlgorithm;
    use crate::backend::server::config::KeySource;
    use crate::shared::AuthConfig;
    use assert_matches::assert_matches;
    use std::path::PathBuf;

    fn fixture(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests/fixtures/keys")
            .join(name)
    }

    fn config(private: &str, public: &str) -> ServerConfig {
        ServerConfig {
            port: 0,
            database_url: None,
            static_dir: PathBuf::from("public"),
            algorithm: SigningAlgorithm::Rs256,
            keys: KeySource::Files {
                private: fixture(private),
                public: fixture(public),
            },
            auth: AuthConfig::default(),
        }
    }

    #[tokio::test]
    async fn test_create_app_with_memory_store() {
        assert!(create_app(&config("rsa_private.pem", "rsa_public.pem")).await.is_ok());
    }

    #[tokio::test]
    async fn test_create_app_rejects_mismatched_keys() {
        let result = create_app(&config("rsa_private.pem", "rsa_other_public.pem")).await;
        assert_matches!(result, Err(InitError::Keys(KeyError::Mismatch)));
    }

    #[tokio::test]
    async fn test_load_store_without_database() {
        let store = load_store(None).await.unwrap();
        assert!(store.find_by_email("a@b.com").await.unwrap().is_none());
    }
}
