/**
 * Password Hashing
 *
 * bcrypt with a configurable work factor. Both operations are CPU-bound;
 * handlers call them from `tokio::task::spawn_blocking`.
 *
 * bcrypt only reads the first 72 bytes of its input (71 plus the NUL
 * terminator). Hashing and verification use the non-truncating variants, so
 * a longer password is refused instead of being silently cut short.
 */
use thiserror::Error;

pub use crate::shared::validation::MAX_PASSWORD_BYTES;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("password is empty")]
    Empty,
    #[error("password is {0} bytes, bcrypt accepts at most 71")]
    TooLong(usize),
    #[error("failed to hash password: {0}")]
    Hashing(String),
    #[error("password does not match")]
    Mismatch,
    #[error("stored password hash is malformed: {0}")]
    MalformedHash(String),
}

const DECOY_PASSWORD: &str = "sessiongate-decoy";

#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a plaintext password with a fresh random salt.
    pub fn hash(&self, plaintext: &str) -> Result<String, PasswordError> {
        if plaintext.is_empty() {
            return Err(PasswordError::Empty);
        }
        bcrypt::non_truncating_hash(plaintext, self.cost).map_err(|e| match e {
            bcrypt::BcryptError::Truncation(_) => PasswordError::TooLong(plaintext.len()),
            other => PasswordError::Hashing(other.to_string()),
        })
    }

    /// A fixed hash at this hasher's cost, for spending the same bcrypt work
    /// on logins whose email has no account.
    pub fn decoy_hash(&self) -> Result<String, PasswordError> {
        bcrypt::hash_with_salt(DECOY_PASSWORD, self.cost, [0u8; 16])
            .map(|parts| parts.to_string())
            .map_err(|e| PasswordError::Hashing(e.to_string()))
    }

    /// Check `plaintext` against a stored hash.
    ///
    /// Returns `Mismatch` for a wrong password (including one too long to
    /// ever have been hashed) and `MalformedHash` when the stored value is
    /// not a bcrypt hash at all.
    pub fn verify(&self, hash: &str, plaintext: &str) -> Result<(), PasswordError> {
        match bcrypt::non_truncating_verify(plaintext, hash) {
            Ok(true) => Ok(()),
            Ok(false) | Err(bcrypt::BcryptError::Truncation(_)) => Err(PasswordError::Mismatch),
            Err(e) => Err(PasswordError::MalformedHash(e.to_string())),
        }
    }

    /// [`PasswordHasher::hash`] on the blocking thread pool.
    pub async fn hash_blocking(&self, plaintext: String) -> Result<String, PasswordError> {
        let hasher = *self;
        tokio::task::spawn_blocking(move || hasher.hash(&plaintext))
            .await
            .map_err(|e| PasswordError::Hashing(format!("hashing task failed: {}", e)))?
    }

    /// [`PasswordHasher::verify`] on the blocking thread pool.
    pub async fn verify_blocking(&self, hash: String, plaintext: String) -> Result<(), PasswordError> {
        let hasher = *self;
        tokio::task::spawn_blocking(move || hasher.verify(&hash, &plaintext))
            .await
            .map_err(|e| PasswordError::Hashing(format!("verification task failed: {}", e)))?
    }
}
