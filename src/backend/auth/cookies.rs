/**
 * Session Cookie
 *
 * Builds the `Set-Cookie` values for login and logout and pulls the session
 * token back out of incoming requests. The cookie lifetime always matches
 * the token lifetime.
 */
use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::HeaderMap;
use chrono::{DateTime, Utc};

use crate::shared::AuthConfig;

const HTTP_DATE: &str = "%a, %d %b %Y %H:%M:%S GMT";
const EPOCH_HTTP_DATE: &str = "Thu, 01 Jan 1970 00:00:00 GMT";

fn attributes(config: &AuthConfig) -> &'static str {
    if config.cookie_secure {
        "HttpOnly; SameSite=Lax; Secure"
    } else {
        "HttpOnly; SameSite=Lax"
    }
}

/// Cookie carrying a freshly issued token, expiring with it.
pub fn session_cookie(config: &AuthConfig, token: &str, now: DateTime<Utc>) -> String {
    let max_age = config.session_ttl.as_secs();
    let expires = chrono::Duration::try_seconds(i64::try_from(max_age).unwrap_or(i64::MAX))
        .and_then(|ttl| now.checked_add_signed(ttl))
        .unwrap_or(DateTime::<Utc>::MAX_UTC);

    format!(
        "{}={}; Path=/; Expires={}; Max-Age={}; {}",
        config.cookie_name,
        token,
        expires.format(HTTP_DATE),
        max_age,
        attributes(config)
    )
}

/// Cookie that overwrites the session cookie with an empty, already-expired
/// value.
pub fn cleared_cookie(config: &AuthConfig) -> String {
    format!(
        "{}=; Path=/; Expires={}; Max-Age=0; {}",
        config.cookie_name,
        EPOCH_HTTP_DATE,
        attributes(config)
    )
}

/// Value of cookie `name` across all `Cookie` headers. Empty values count as
/// absent.
pub fn token_from_cookies(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| key.trim() == name)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

/// Cookie first, then bearer header.
pub fn extract_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    token_from_cookies(headers, cookie_name).or_else(|| bearer_token(headers))
}
