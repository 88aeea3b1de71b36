/**
 * User Model and Credential Store
 *
 * The `User` record and the `CredentialStore` trait the handlers depend on,
 * with a PostgreSQL implementation for deployments and an in-memory one for
 * tests and local development.
 *
 * Emails are stored trimmed and lowercased; every store method normalizes
 * its input the same way, so lookups are case-insensitive.
 */
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::shared::validation::normalize_email;

/// User struct representing a user in the database
#[derive(Clone, Serialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID)
    pub id: Uuid,
    /// User email address, normalized
    pub email: String,
    /// Hashed password (bcrypt); never serialized
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
    /// Updated at timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(email: &str, password_hash: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email: normalize_email(email),
            password_hash: password_hash.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("email is already registered")]
    DuplicateEmail,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("store call exceeded {0:?}")]
    Timeout(Duration),
}

/// Persistence for user identities.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    /// Atomically insert a new user. Fails with `DuplicateEmail` if the email
    /// is taken, leaving the existing record untouched.
    async fn create(&self, email: &str, password_hash: &str) -> Result<User, StoreError>;
}

/// Run a store call with an upper bound on its duration.
pub async fn with_timeout<T, F>(limit: Duration, call: F) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, StoreError>>,
{
    tokio::time::timeout(limit, call)
        .await
        .map_err(|_| StoreError::Timeout(limit))?
}

/// PostgreSQL-backed store
#[derive(Debug, Clone)]
pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect and run pending migrations.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .acquire_timeout(Duration::from_secs(5))
            .connect(database_url)
            .await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database connected and migrations applied");
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(normalize_email(email))
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create(&self, email: &str, password_hash: &str) -> Result<User, StoreError> {
        let candidate = User::new(email, password_hash);

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, email, password_hash, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (email) DO NOTHING
            RETURNING id, email, password_hash, created_at, updated_at
            "#,
        )
        .bind(candidate.id)
        .bind(&candidate.email)
        .bind(&candidate.password_hash)
        .bind(candidate.created_at)
        .bind(candidate.updated_at)
        .fetch_optional(&self.pool)
        .await?;

        user.ok_or(StoreError::DuplicateEmail)
    }
}

/// In-memory store keyed by normalized email
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.get(&normalize_email(email)).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| user.id == id)
            .cloned())
    }

    async fn create(&self, email: &str, password_hash: &str) -> Result<User, StoreError> {
        let user = User::new(email, password_hash);
        let mut users = self.users.write().await;
        if users.contains_key(&user.email) {
            return Err(StoreError::DuplicateEmail);
        }
        users.insert(user.email.clone(), user.clone());
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_create_and_find() {
        let store = InMemoryCredentialStore::new();
        let user = store.create("a@b.com", "hash").await.unwrap();

        let by_email = store.find_by_email("a@b.com").await.unwrap().unwrap();
        assert_eq!(by_email.id, user.id);

        let by_id = store.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(by_id.email, "a@b.com");
    }

    #[tokio::test]
    async fn test_lookup_is_case_insensitive() {
        let store = InMemoryCredentialStore::new();
        store.create("  Alice@Example.com", "hash").await.unwrap();
        assert!(store.find_by_email("alice@example.COM").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_duplicate_email_keeps_original() {
        let store = InMemoryCredentialStore::new();
        let original = store.create("a@b.com", "first").await.unwrap();

        let result = store.create("A@B.com", "second").await;
        assert_matches!(result, Err(StoreError::DuplicateEmail));

        let stored = store.find_by_email("a@b.com").await.unwrap().unwrap();
        assert_eq!(stored.id, original.id);
        assert_eq!(stored.password_hash, "first");
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_concurrent_duplicate_registration() {
        let store = Arc::new(InMemoryCredentialStore::new());
        let mut handles = Vec::new();
        for i in 0..16 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.create("race@b.com", &format!("hash-{}", i)).await
            }));
        }

        let mut created = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                created += 1;
            }
        }
        assert_eq!(created, 1);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_unknown_lookups() {
        let store = InMemoryCredentialStore::new();
        assert!(store.find_by_email("nobody@b.com").await.unwrap().is_none());
        assert!(store.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_with_timeout_elapses() {
        let result: Result<(), StoreError> = with_timeout(Duration::from_millis(10), async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(())
        })
        .await;
        assert_matches!(result, Err(StoreError::Timeout(_)));
    }

    #[tokio::test]
    async fn test_with_timeout_passes_through() {
        let result = with_timeout(Duration::from_secs(1), async { Ok::<_, StoreError>(7) }).await;
        assert_eq!(result.unwrap(), 7);
    }

    #[test]
    fn test_user_never_exposes_hash() {
        let user = User::new("a@b.com", "$2b$04$secret");
        assert!(!format!("{:?}", user).contains("secret"));
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "a@b.com");
    }
}
