/**
 * Session Tokens
 *
 * Issues and verifies the signed JWTs carried in the session cookie.
 *
 * Verification checks the signature before anything else, so `Expired` is
 * only ever reported for a token this service actually signed. Every other
 * failure (malformed input, bad signature, wrong algorithm, missing claims)
 * collapses into `Invalid`.
 */
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::keys::{decoding_key, KeyError, KeyPair, SigningAlgorithm};
use super::users::User;

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// User ID
    pub sub: Uuid,
    /// Email
    pub email: String,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl SessionClaims {
    pub fn for_user(user: &User, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        let ttl = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
        let iat = issued_at.timestamp();
        Self {
            sub: user.id,
            email: user.email.clone(),
            iat,
            exp: iat.saturating_add(ttl),
        }
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("token is invalid")]
    Invalid,
    #[error("token has expired")]
    Expired,
    #[error("failed to sign token: {0}")]
    Signing(String),
}

/// Verification half of the token service; needs only the public key.
#[derive(Clone)]
pub struct TokenVerifier {
    algorithm: SigningAlgorithm,
    decoding: DecodingKey,
    leeway: u64,
}

impl TokenVerifier {
    pub fn new(algorithm: SigningAlgorithm, decoding: DecodingKey, leeway: u64) -> Self {
        Self {
            algorithm,
            decoding,
            leeway,
        }
    }

    pub fn from_public_pem(
        algorithm: SigningAlgorithm,
        public_pem: &[u8],
        leeway: u64,
    ) -> Result<Self, KeyError> {
        Ok(Self::new(algorithm, decoding_key(algorithm, public_pem)?, leeway))
    }

    /// Verify signature, then expiry, and return the claims.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, TokenError> {
        if token.is_empty() {
            return Err(TokenError::Invalid);
        }

        let mut validation = Validation::new(self.algorithm.jwt_algorithm());
        validation.leeway = self.leeway;
        validation.set_required_spec_claims(&["exp", "sub"]);

        decode::<SessionClaims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })
    }
}

/// Issues and verifies session tokens with one process-wide key pair.
#[derive(Clone)]
pub struct TokenService {
    keys: Arc<KeyPair>,
    verifier: TokenVerifier,
}

impl TokenService {
    pub fn new(keys: Arc<KeyPair>, leeway: u64) -> Self {
        let verifier = TokenVerifier::new(keys.algorithm(), keys.decoding_key().clone(), leeway);
        Self { keys, verifier }
    }

    /// Create a token for `user` that expires `ttl` from now.
    pub fn issue(&self, user: &User, ttl: Duration) -> Result<String, TokenError> {
        self.sign(&SessionClaims::for_user(user, Utc::now(), ttl))
    }

    /// Sign arbitrary claims with the service key.
    pub fn sign(&self, claims: &SessionClaims) -> Result<String, TokenError> {
        let header = Header::new(self.keys.algorithm().jwt_algorithm());
        encode(&header, claims, self.keys.encoding_key()).map_err(|e| {
            tracing::error!("Failed to sign session token: {:?}", e);
            TokenError::Signing(e.to_string())
        })
    }

    pub fn verify(&self, token: &str) -> Result<SessionClaims, TokenError> {
        self.verifier.verify(token)
    }

    pub fn verifier(&self) -> &TokenVerifier {
        &self.verifier
    }

    pub fn algorithm(&self) -> SigningAlgorithm {
        self.keys.algorithm()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;

    const RSA_PRIVATE: &[u8] = include_bytes!("../../../tests/fixtures/keys/rsa_private.pem");
    const RSA_PUBLIC: &[u8] = include_bytes!("../../../tests/fixtures/keys/rsa_public.pem");
    const RSA_OTHER_PRIVATE: &[u8] =
        include_bytes!("../../../tests/fixtures/keys/rsa_other_private.pem");
    const RSA_OTHER_PUBLIC: &[u8] =
        include_bytes!("../../../tests/fixtures/keys/rsa_other_public.pem");
    const ED_PRIVATE: &[u8] = include_bytes!("../../../tests/fixtures/keys/ed25519_private.pem");
    const ED_PUBLIC: &[u8] = include_bytes!("../../../tests/fixtures/keys/ed25519_public.pem");

    const HOUR: Duration = Duration::from_secs(3600);

    fn rsa_service() -> TokenService {
        let keys = KeyPair::from_pem(SigningAlgorithm::Rs256, RSA_PRIVATE, RSA_PUBLIC).unwrap();
        TokenService::new(Arc::new(keys), 0)
    }

    fn ed_service() -> TokenService {
        let keys = KeyPair::from_pem(SigningAlgorithm::EdDsa, ED_PRIVATE, ED_PUBLIC).unwrap();
        TokenService::new(Arc::new(keys), 0)
    }

    fn user() -> User {
        User::new("test@example.com", "$2b$04$hash")
    }

    #[test]
    fn test_issue_and_verify() {
        let service = rsa_service();
        let user = user();
        let token = service.issue(&user, HOUR).unwrap();

        let claims = service.verify(&token).unwrap();
        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.email, "test@example.com");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_eddsa_issue_and_verify() {
        let service = ed_service();
        let user = user();
        let token = service.issue(&user, HOUR).unwrap();
        assert_eq!(service.verify(&token).unwrap().sub, user.id);
    }

    #[test]
    fn test_token_never_contains_password_hash() {
        let service = rsa_service();
        let token = service.issue(&user(), HOUR).unwrap();
        let claims = service.verify(&token).unwrap();
        let json = serde_json::to_string(&claims).unwrap();
        assert!(!json.contains("$2b$"));
    }

    #[test]
    fn test_expired_token() {
        let service = rsa_service();
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: Uuid::new_v4(),
            email: "test@example.com".into(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = service.sign(&claims).unwrap();
        assert_matches!(service.verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_leeway_accepts_recently_expired() {
        let keys = KeyPair::from_pem(SigningAlgorithm::Rs256, RSA_PRIVATE, RSA_PUBLIC).unwrap();
        let service = TokenService::new(Arc::new(keys), 120);
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: Uuid::new_v4(),
            email: "test@example.com".into(),
            iat: now - 100,
            exp: now - 10,
        };
        let token = service.sign(&claims).unwrap();
        assert!(service.verify(&token).is_ok());
    }

    #[test]
    fn test_expired_token_with_foreign_signature_is_invalid() {
        let other = KeyPair::from_pem(SigningAlgorithm::Rs256, RSA_OTHER_PRIVATE, RSA_OTHER_PUBLIC)
            .unwrap();
        let other = TokenService::new(Arc::new(other), 0);
        let now = Utc::now().timestamp();
        let token = other
            .sign(&SessionClaims {
                sub: Uuid::new_v4(),
                email: "test@example.com".into(),
                iat: now - 7200,
                exp: now - 3600,
            })
            .unwrap();
        assert_matches!(rsa_service().verify(&token), Err(TokenError::Invalid));
    }

    #[test]
    fn test_empty_and_garbage_tokens() {
        let service = rsa_service();
        assert_matches!(service.verify(""), Err(TokenError::Invalid));
        assert_matches!(service.verify("invalid.token.here"), Err(TokenError::Invalid));
        assert_matches!(service.verify("no-dots"), Err(TokenError::Invalid));
    }

    #[test]
    fn test_tampered_payload() {
        let service = rsa_service();
        let token = service.issue(&user(), HOUR).unwrap();
        let other = service.issue(&User::new("evil@example.com", "x"), HOUR).unwrap();

        let parts: Vec<&str> = token.split('.').collect();
        let other_parts: Vec<&str> = other.split('.').collect();
        let forged = format!("{}.{}.{}", parts[0], other_parts[1], parts[2]);
        assert_matches!(service.verify(&forged), Err(TokenError::Invalid));
    }

    #[test]
    fn test_wrong_algorithm_rejected() {
        let ed_token = ed_service().issue(&user(), HOUR).unwrap();
        assert_matches!(rsa_service().verify(&ed_token), Err(TokenError::Invalid));
    }

    #[test]
    fn test_verifier_from_public_key_only() {
        let token = rsa_service().issue(&user(), HOUR).unwrap();
        let verifier = TokenVerifier::from_public_pem(SigningAlgorithm::Rs256, RSA_PUBLIC, 0).unwrap();
        assert!(verifier.verify(&token).is_ok());

        let foreign = TokenVerifier::from_public_pem(SigningAlgorithm::Rs256, RSA_OTHER_PUBLIC, 0)
            .unwrap();
        assert_matches!(foreign.verify(&token), Err(TokenError::Invalid));
    }

    #[test]
    fn test_expires_at() {
        let claims = SessionClaims::for_user(
            &user(),
            DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
            HOUR,
        );
        assert_eq!(claims.expires_at().unwrap().timestamp(), 1_700_003_600);
    }
}
