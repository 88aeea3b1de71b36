/**
 * Server Configuration
 *
 * Loads `ServerConfig` from an optional TOML file and the process
 * environment. Environment variables always win over file values.
 *
 * # Environment Variables
 *
 * - `SESSIONGATE_CONFIG` - path to a TOML file with the same settings
 * - `SERVER_PORT` - listen port (default 3000)
 * - `DATABASE_URL` - PostgreSQL URL; unset means the in-memory store
 * - `STATIC_DIR` - directory served under `/static` (default `public`)
 * - `JWT_ALGORITHM` - `RS256` (default) or `EdDSA`
 * - `JWT_PRIVATE_KEY` / `JWT_PUBLIC_KEY` - base64url-encoded PEM
 * - `JWT_PRIVATE_KEY_FILE` / `JWT_PUBLIC_KEY_FILE` - PEM file paths
 * - `BCRYPT_COST`, `SESSION_TTL_SECS`, `COOKIE_SECURE`, `STORE_TIMEOUT_MS`,
 *   `TOKEN_LEEWAY_SECS` - authentication tunables
 */

use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

use crate::backend::auth::keys::{KeyError, KeyPair, SigningAlgorithm};
use crate::shared::{AuthConfig, AuthSettings, ConfigError};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_STATIC_DIR: &str = "public";

/// Where the signing keys come from
#[derive(Clone, PartialEq)]
pub enum KeySource {
    /// base64url-wrapped PEM strings
    Inline { private: String, public: String },
    /// PEM files on disk
    Files { private: PathBuf, public: PathBuf },
}

impl std::fmt::Debug for KeySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeySource::Inline { .. } => f.write_str("Inline([REDACTED])"),
            KeySource::Files { private, public } => f
                .debug_struct("Files")
                .field("private", private)
                .field("public", public)
                .finish(),
        }
    }
}

/// Settings accepted in the TOML file
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub port: Option<u16>,
    pub database_url: Option<String>,
    pub static_dir: Option<PathBuf>,
    pub jwt_algorithm: Option<String>,
    pub jwt_private_key_file: Option<PathBuf>,
    pub jwt_public_key_file: Option<PathBuf>,
    pub auth: AuthSettings,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(toml::from_str(&contents)?)
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub database_url: Option<String>,
    pub static_dir: PathBuf,
    pub algorithm: SigningAlgorithm,
    pub keys: KeySource,
    pub auth: AuthConfig,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`, which returns the value of a
    /// variable if set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let file = match var("SESSIONGATE_CONFIG") {
            Some(path) => {
                tracing::info!("Loading configuration file {}", path);
                FileConfig::load(Path::new(&path))?
            }
            None => FileConfig::default(),
        };

        let port = parse_var::<u16>(&var, "SERVER_PORT")?
            .or(file.port)
            .unwrap_or(DEFAULT_PORT);
        let database_url = var("DATABASE_URL").or(file.database_url);
        let static_dir = var("STATIC_DIR")
            .map(PathBuf::from)
            .or(file.static_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR));

        let algorithm = match var("JWT_ALGORITHM").or(file.jwt_algorithm) {
            Some(name) => name.parse::<SigningAlgorithm>().map_err(|e: KeyError| ConfigError::InvalidValue {
                field: "JWT_ALGORITHM",
                reason: e.to_string(),
            })?,
            None => SigningAlgorithm::default(),
        };

        let keys = match (var("JWT_PRIVATE_KEY"), var("JWT_PUBLIC_KEY")) {
            (Some(private), Some(public)) => KeySource::Inline { private, public },
            _ => {
                let private = var("JWT_PRIVATE_KEY_FILE")
                    .map(PathBuf::from)
                    .or(file.jwt_private_key_file)
                    .ok_or(ConfigError::MissingValue("JWT_PRIVATE_KEY"))?;
                let public = var("JWT_PUBLIC_KEY_FILE")
                    .map(PathBuf::from)
                    .or(file.jwt_public_key_file)
                    .ok_or(ConfigError::MissingValue("JWT_PUBLIC_KEY"))?;
                KeySource::Files { private, public }
            }
        };

        let env_auth = AuthSettings {
            bcrypt_cost: parse_var(&var, "BCRYPT_COST")?,
            session_ttl_secs: parse_var(&var, "SESSION_TTL_SECS")?,
            cookie_secure: parse_bool(&var, "COOKIE_SECURE")?,
            store_timeout_ms: parse_var(&var, "STORE_TIMEOUT_MS")?,
            token_leeway_secs: parse_var(&var, "TOKEN_LEEWAY_SECS")?,
            ..AuthSettings::default()
        };
        let auth = AuthConfig::builder()
            .settings(&file.auth.merge(env_auth))
            .build()?;

        Ok(Self {
            port,
            database_url,
            static_dir,
            algorithm,
            keys,
            auth,
        })
    }

    /// Load and probe the signing key pair.
    pub fn load_keys(&self) -> Result<KeyPair, KeyError> {
        match &self.keys {
            KeySource::Inline { private, public } => {
                KeyPair::from_base64_pem(self.algorithm, private, public)
            }
            KeySource::Files { private, public } => {
                KeyPair::from_files(self.algorithm, private, public)
            }
        }
    }
}

fn parse_var<T>(
    var: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    var(name)
        .map(|value| {
            value.trim().parse::<T>().map_err(|e| ConfigError::InvalidValue {
                field: name,
                reason: e.to_string(),
            })
        })
        .transpose()
}

fn parse_bool(
    var: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<bool>, ConfigError> {
    var(name)
        .map(|value| match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            other => Err(ConfigError::InvalidValue {
                field: name,
                reason: format!("expected a boolean, got {:?}", other),
            }),
        })
        .transpose()
}
