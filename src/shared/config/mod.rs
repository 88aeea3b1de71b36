//! Authentication configuration
//!
//! `AuthConfig` carries every tunable of the authentication subsystem:
//! password policy, hashing cost, session lifetime, cookie attributes and the
//! store timeout. It is built once at startup through [`AuthConfig::builder`],
//! validated, and then shared read-only behind an `Arc`.
//!
//! [`AuthSettings`] is the partial, deserializable form used by the optional
//! TOML file; unset fields fall back to the builder defaults.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use super::validation::PasswordPolicy;

pub const DEFAULT_BCRYPT_COST: u32 = 12;
pub const MIN_BCRYPT_COST: u32 = 4;
pub const MAX_BCRYPT_COST: u32 = 31;
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(30 * 24 * 60 * 60);
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_COOKIE_NAME: &str = "token";

/// Authentication configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AuthConfig {
    pub password_policy: PasswordPolicy,
    pub bcrypt_cost: u32,
    /// Lifetime of both the token `exp` and the cookie.
    pub session_ttl: Duration,
    pub cookie_name: String,
    pub cookie_secure: bool,
    /// Value of the `HX-Redirect` header after login and logout.
    pub redirect_to: String,
    pub store_timeout: Duration,
    /// Clock skew tolerated when checking `exp`, in seconds.
    pub token_leeway: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            password_policy: PasswordPolicy::default(),
            bcrypt_cost: DEFAULT_BCRYPT_COST,
            session_ttl: DEFAULT_SESSION_TTL,
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            cookie_secure: false,
            redirect_to: "/".to_string(),
            store_timeout: DEFAULT_STORE_TIMEOUT,
            token_leeway: 0,
        }
    }
}

impl AuthConfig {
    /// Create a new AuthConfigBuilder
    pub fn builder() -> AuthConfigBuilder {
        AuthConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let policy = &self.password_policy;
        if policy.min_length == 0 || policy.min_length > policy.max_length {
            return Err(ConfigError::InvalidPasswordPolicy {
                min: policy.min_length,
                max: policy.max_length,
            });
        }
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&self.bcrypt_cost) {
            return Err(ConfigError::InvalidBcryptCost(self.bcrypt_cost));
        }
        if self.session_ttl.is_zero() {
            return Err(ConfigError::InvalidValue {
                field: "session_ttl",
                reason: "must be greater than zero".into(),
            });
        }
        if self.store_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                field: "store_timeout",
                reason: "must be greater than zero".into(),
            });
        }
        if self.cookie_name.is_empty() {
            return Err(ConfigError::MissingValue("cookie_name"));
        }
        Ok(())
    }
}

/// Builder for AuthConfig
#[derive(Debug, Default)]
pub struct AuthConfigBuilder {
    config: AuthConfig,
}

impl AuthConfigBuilder {
    pub fn password_policy(mut self, min_length: usize, max_length: usize) -> Self {
        self.config.password_policy = PasswordPolicy {
            min_length,
            max_length,
        };
        self
    }

    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.config.bcrypt_cost = cost;
        self
    }

    pub fn session_ttl(mut self, ttl: Duration) -> Self {
        self.config.session_ttl = ttl;
        self
    }

    pub fn cookie_name(mut self, name: impl Into<String>) -> Self {
        self.config.cookie_name = name.into();
        self
    }

    pub fn cookie_secure(mut self, secure: bool) -> Self {
        self.config.cookie_secure = secure;
        self
    }

    pub fn redirect_to(mut self, location: impl Into<String>) -> Self {
        self.config.redirect_to = location.into();
        self
    }

    pub fn store_timeout(mut self, timeout: Duration) -> Self {
        self.config.store_timeout = timeout;
        self
    }

    pub fn token_leeway(mut self, seconds: u64) -> Self {
        self.config.token_leeway = seconds;
        self
    }

    /// Overlay every field that is set in `settings`.
    pub fn settings(mut self, settings: &AuthSettings) -> Self {
        if let Some(min) = settings.password_min_length {
            self.config.password_policy.min_length = min;
        }
        if let Some(max) = settings.password_max_length {
            self.config.password_policy.max_length = max;
        }
        if let Some(cost) = settings.bcrypt_cost {
            self.config.bcrypt_cost = cost;
        }
        if let Some(secs) = settings.session_ttl_secs {
            self.config.session_ttl = Duration::from_secs(secs);
        }
        if let Some(name) = &settings.cookie_name {
            self.config.cookie_name = name.clone();
        }
        if let Some(secure) = settings.cookie_secure {
            self.config.cookie_secure = secure;
        }
        if let Some(location) = &settings.redirect_to {
            self.config.redirect_to = location.clone();
        }
        if let Some(ms) = settings.store_timeout_ms {
            self.config.store_timeout = Duration::from_millis(ms);
        }
        if let Some(leeway) = settings.token_leeway_secs {
            self.config.token_leeway = leeway;
        }
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<AuthConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Partial authentication settings, as read from a config file or the
/// environment.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthSettings {
    pub password_min_length: Option<usize>,
    pub password_max_length: Option<usize>,
    pub bcrypt_cost: Option<u32>,
    pub session_ttl_secs: Option<u64>,
    pub cookie_name: Option<String>,
    pub cookie_secure: Option<bool>,
    pub redirect_to: Option<String>,
    pub store_timeout_ms: Option<u64>,
    pub token_leeway_secs: Option<u64>,
}

impl AuthSettings {
    /// Fields set in `other` win.
    pub fn merge(self, other: AuthSettings) -> AuthSettings {
        AuthSettings {
            password_min_length: other.password_min_length.or(self.password_min_length),
            password_max_length: other.password_max_length.or(self.password_max_length),
            bcrypt_cost: other.bcrypt_cost.or(self.bcrypt_cost),
            session_ttl_secs: other.session_ttl_secs.or(self.session_ttl_secs),
            cookie_name: other.cookie_name.or(self.cookie_name),
            cookie_secure: other.cookie_secure.or(self.cookie_secure),
            redirect_to: other.redirect_to.or(self.redirect_to),
            store_timeout_ms: other.store_timeout_ms.or(self.store_timeout_ms),
            token_leeway_secs: other.token_leeway_secs.or(self.token_leeway_secs),
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
    #[error("invalid password policy: min {min} must be between 1 and max {max}")]
    InvalidPasswordPolicy { min: usize, max: usize },
    #[error("bcrypt cost {0} outside 4..=31")]
    InvalidBcryptCost(u32),
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_defaults() {
        let config = AuthConfig::builder().build().unwrap();
        assert_eq!(config.password_policy, PasswordPolicy::default());
        assert_eq!(config.bcrypt_cost, 12);
        assert_eq!(config.session_ttl, Duration::from_secs(2_592_000));
        assert_eq!(config.cookie_name, "token");
        assert_eq!(config.redirect_to, "/");
        assert_eq!(config.store_timeout, Duration::from_secs(5));
        assert_eq!(config.token_leeway, 0);
        assert!(!config.cookie_secure);
    }

    #[test]
    fn test_rejects_inverted_policy() {
        let result = AuthConfig::builder().password_policy(20, 10).build();
        assert_matches!(result, Err(ConfigError::InvalidPasswordPolicy { min: 20, max: 10 }));
    }

    #[test]
    fn test_rejects_bcrypt_cost_out_of_range() {
        assert_matches!(
            AuthConfig::builder().bcrypt_cost(3).build(),
            Err(ConfigError::InvalidBcryptCost(3))
        );
        assert_matches!(
            AuthConfig::builder().bcrypt_cost(32).build(),
            Err(ConfigError::InvalidBcryptCost(32))
        );
    }

    #[test]
    fn test_rejects_zero_ttl() {
        let result = AuthConfig::builder().session_ttl(Duration::ZERO).build();
        assert_matches!(result, Err(ConfigError::InvalidValue { field: "session_ttl", .. }));
    }

    #[test]
    fn test_settings_overlay() {
        let settings: AuthSettings = toml::from_str(
            r#"
            bcrypt_cost = 4
            session_ttl_secs = 60
            cookie_secure = true
            "#,
        )
        .unwrap();
        let config = AuthConfig::builder().settings(&settings).build().unwrap();
        assert_eq!(config.bcrypt_cost, 4);
        assert_eq!(config.session_ttl, Duration::from_secs(60));
        assert!(config.cookie_secure);
        assert_eq!(config.cookie_name, "token");
    }

    #[test]
    fn test_settings_reject_unknown_keys() {
        let result: Result<AuthSettings, _> = toml::from_str("bcrypt_rounds = 4");
        assert!(result.is_err());
    }

    #[test]
    fn test_merge_prefers_other() {
        let file = AuthSettings {
            bcrypt_cost: Some(10),
            cookie_secure: Some(true),
            ..Default::default()
        };
        let env = AuthSettings {
            bcrypt_cost: Some(4),
            ..Default::default()
        };
        let merged = file.merge(env);
        assert_eq!(merged.bcrypt_cost, Some(4));
        assert_eq!(merged.cookie_secure, Some(true));
    }
}
