/**
 * Signing Key Material
 *
 * The asymmetric key pair used to sign and verify session tokens. A `KeyPair`
 * is loaded once at startup, probed with a sign/verify round trip so that a
 * private key paired with the wrong public key fails immediately, and then
 * shared read-only behind an `Arc`.
 *
 * Supported algorithms are RS256 (default) and EdDSA (Ed25519). Keys are PEM,
 * either raw or base64url-encoded so they fit in a single environment
 * variable.
 */
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const PEM_URL_SAFE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);
const PEM_STANDARD: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[derive(Debug, Error)]
pub enum KeyError {
    #[error("unsupported signing algorithm: {0}")]
    UnsupportedAlgorithm(String),
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),
    #[error("key is not valid base64: {0}")]
    Encoding(String),
    #[error("failed to read key file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("private and public keys do not form a pair")]
    Mismatch,
}

/// Asymmetric algorithms accepted for session tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SigningAlgorithm {
    #[default]
    Rs256,
    EdDsa,
}

impl SigningAlgorithm {
    pub fn jwt_algorithm(&self) -> Algorithm {
        match self {
            SigningAlgorithm::Rs256 => Algorithm::RS256,
            SigningAlgorithm::EdDsa => Algorithm::EdDSA,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SigningAlgorithm::Rs256 => "RS256",
            SigningAlgorithm::EdDsa => "EdDSA",
        }
    }
}

impl fmt::Display for SigningAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SigningAlgorithm {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "RS256" => Ok(SigningAlgorithm::Rs256),
            "EDDSA" | "ED25519" => Ok(SigningAlgorithm::EdDsa),
            other => Err(KeyError::UnsupportedAlgorithm(other.to_string())),
        }
    }
}

/// Parse a PEM public key for `algorithm`.
pub fn decoding_key(algorithm: SigningAlgorithm, public_pem: &[u8]) -> Result<DecodingKey, KeyError> {
    let key = match algorithm {
        SigningAlgorithm::Rs256 => DecodingKey::from_rsa_pem(public_pem),
        SigningAlgorithm::EdDsa => DecodingKey::from_ed_pem(public_pem),
    };
    key.map_err(|e| KeyError::InvalidPublicKey(e.to_string()))
}

fn encoding_key(algorithm: SigningAlgorithm, private_pem: &[u8]) -> Result<EncodingKey, KeyError> {
    let key = match algorithm {
        SigningAlgorithm::Rs256 => EncodingKey::from_rsa_pem(private_pem),
        SigningAlgorithm::EdDsa => EncodingKey::from_ed_pem(private_pem),
    };
    key.map_err(|e| KeyError::InvalidPrivateKey(e.to_string()))
}

/// Decode a base64 (URL-safe or standard, padding optional) wrapped PEM.
pub fn decode_base64_pem(encoded: &str) -> Result<Vec<u8>, KeyError> {
    let encoded = encoded.trim();
    PEM_URL_SAFE
        .decode(encoded)
        .or_else(|_| PEM_STANDARD.decode(encoded))
        .map_err(|e| KeyError::Encoding(e.to_string()))
}

fn read_key_file(path: &Path) -> Result<Vec<u8>, KeyError> {
    std::fs::read(path).map_err(|source| KeyError::Io {
        path: path.display().to_string(),
        source,
    })
}

#[derive(Serialize, Deserialize)]
struct Probe {
    sub: String,
}

/// Signing and verification keys for one algorithm.
#[derive(Clone)]
pub struct KeyPair {
    algorithm: SigningAlgorithm,
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}

impl KeyPair {
    /// Build a key pair from PEM-encoded keys and check that they match.
    pub fn from_pem(
        algorithm: SigningAlgorithm,
        private_pem: &[u8],
        public_pem: &[u8],
    ) -> Result<Self, KeyError> {
        let pair = Self {
            algorithm,
            encoding: encoding_key(algorithm, private_pem)?,
            decoding: decoding_key(algorithm, public_pem)?,
        };
        pair.probe()?;
        Ok(pair)
    }

    /// Same as [`KeyPair::from_pem`] for base64-wrapped PEM strings.
    pub fn from_base64_pem(
        algorithm: SigningAlgorithm,
        private_b64: &str,
        public_b64: &str,
    ) -> Result<Self, KeyError> {
        let private_pem = decode_base64_pem(private_b64)?;
        let public_pem = decode_base64_pem(public_b64)?;
        Self::from_pem(algorithm, &private_pem, &public_pem)
    }

    pub fn from_files(
        algorithm: SigningAlgorithm,
        private_path: impl AsRef<Path>,
        public_path: impl AsRef<Path>,
    ) -> Result<Self, KeyError> {
        let private_pem = read_key_file(private_path.as_ref())?;
        let public_pem = read_key_file(public_path.as_ref())?;
        Self::from_pem(algorithm, &private_pem, &public_pem)
    }

    pub fn algorithm(&self) -> SigningAlgorithm {
        self.algorithm
    }

    pub fn encoding_key(&self) -> &EncodingKey {
        &self.encoding
    }

    pub fn decoding_key(&self) -> &DecodingKey {
        &self.decoding
    }

    fn probe(&self) -> Result<(), KeyError> {
        let alg = self.algorithm.jwt_algorithm();
        let token = encode(
            &Header::new(alg),
            &Probe {
                sub: "probe".to_string(),
            },
            &self.encoding,
        )
        .map_err(|e| KeyError::InvalidPrivateKey(e.to_string()))?;

        let mut validation = Validation::new(alg);
        validation.validate_exp = false;
        validation.set_required_spec_claims::<&str>(&[]);
        decode::<Probe>(&token, &self.decoding, &validation)
            .map(|_| ())
            .map_err(|e| {
                tracing::error!("Key pair probe failed: {:?}", e);
                KeyError::Mismatch
            })
    }
}
