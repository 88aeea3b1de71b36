/**
 * Credential validation
 *
 * Shape checks applied to registration and login payloads before any store
 * or hashing work happens. Each failing field produces exactly one
 * `FieldViolation` (the first rule it breaks), rendered as
 * `"<Field> is <constraint>"`, e.g. `"Email is email"` or `"Password is min"`.
 *
 * Lengths are counted in characters, not bytes. Independently of the
 * policy, a password may not exceed `MAX_PASSWORD_BYTES` bytes of UTF-8,
 * the most bcrypt hashes without truncation.
 */
use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::error::SharedError;

/// Longest password, in bytes, that bcrypt hashes in full.
pub const MAX_PASSWORD_BYTES: usize = 71;

const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";

/// A validation rule a field can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Constraint {
    Required,
    Email,
    Min,
    Max,
}

impl Constraint {
    pub fn tag(&self) -> &'static str {
        match self {
            Constraint::Required => "required",
            Constraint::Email => "email",
            Constraint::Min => "min",
            Constraint::Max => "max",
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One failed rule on one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: String,
    pub constraint: Constraint,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, constraint: Constraint) -> Self {
        Self {
            field: field.into(),
            constraint,
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} is {}", self.field, self.constraint)
    }
}

/// Password length bounds, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordPolicy {
    pub min_length: usize,
    pub max_length: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 8,
            max_length: 32,
        }
    }
}

/// Email/password pair as submitted by a client.
///
/// `Debug` never prints the password.
#[derive(Clone, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Email as stored: trimmed and lowercased.
    pub fn normalized_email(&self) -> String {
        normalize_email(&self.email)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn is_valid_email(email: &str) -> bool {
    Regex::new(EMAIL_PATTERN).is_ok_and(|re| re.is_match(email))
}

fn check_email(email: &str) -> Option<FieldViolation> {
    let email = email.trim();
    if email.is_empty() {
        Some(FieldViolation::new("Email", Constraint::Required))
    } else if !is_valid_email(email) {
        Some(FieldViolation::new("Email", Constraint::Email))
    } else {
        None
    }
}

fn check_password(password: &str, min: Option<usize>, max: usize) -> Option<FieldViolation> {
    let length = password.chars().count();
    if length == 0 {
        Some(FieldViolation::new("Password", Constraint::Required))
    } else if min.is_some_and(|min| length < min) {
        Some(FieldViolation::new("Password", Constraint::Min))
    } else if length > max || password.len() > MAX_PASSWORD_BYTES {
        Some(FieldViolation::new("Password", Constraint::Max))
    } else {
        None
    }
}

fn collect(violations: impl IntoIterator<Item = Option<FieldViolation>>) -> Result<(), SharedError> {
    let violations: Vec<FieldViolation> = violations.into_iter().flatten().collect();
    if violations.is_empty() {
        Ok(())
    } else {
        Err(SharedError::validation(violations))
    }
}

/// Full policy: email grammar plus password length within `policy`.
pub fn validate_registration(
    credentials: &Credentials,
    policy: &PasswordPolicy,
) -> Result<(), SharedError> {
    collect([
        check_email(&credentials.email),
        check_password(
            &credentials.password,
            Some(policy.min_length),
            policy.max_length,
        ),
    ])
}

/// Login only checks presence and the upper bound on the password; a short
/// password is just a wrong password.
pub fn validate_login(credentials: &Credentials, policy: &PasswordPolicy) -> Result<(), SharedError> {
    collect([
        check_email(&credentials.email),
        check_password(&credentials.password, None, policy.max_length),
    ])
}
