//! Authentication test helpers
//!
//! Builds the full router over an in-memory credential store and the RSA
//! fixture keys, and wraps the register/login round trips the API tests
//! repeat.

use std::path::PathBuf;
use std::sync::Arc;

use axum_test::{TestResponse, TestServer};
use serde_json::json;
use sessiongate::backend::auth::{
    InMemoryCredentialStore, KeyPair, SigningAlgorithm, TokenService,
};
use sessiongate::backend::routes::create_router;
use sessiongate::backend::server::AppState;
use sessiongate::shared::AuthConfig;

pub const RSA_PRIVATE: &[u8] = include_bytes!("../fixtures/keys/rsa_private.pem");
pub const RSA_PUBLIC: &[u8] = include_bytes!("../fixtures/keys/rsa_public.pem");
pub const RSA_OTHER_PRIVATE: &[u8] = include_bytes!("../fixtures/keys/rsa_other_private.pem");
pub const RSA_OTHER_PUBLIC: &[u8] = include_bytes!("../fixtures/keys/rsa_other_public.pem");
pub const ED25519_PRIVATE: &[u8] = include_bytes!("../fixtures/keys/ed25519_private.pem");
pub const ED25519_PUBLIC: &[u8] = include_bytes!("../fixtures/keys/ed25519_public.pem");

pub const TEST_EMAIL: &str = "a@b.com";
pub const TEST_PASSWORD: &str = "password1";

pub fn test_keys() -> KeyPair {
    KeyPair::from_pem(SigningAlgorithm::Rs256, RSA_PRIVATE, RSA_PUBLIC).expect("fixture keys")
}

pub fn other_keys() -> KeyPair {
    KeyPair::from_pem(SigningAlgorithm::Rs256, RSA_OTHER_PRIVATE, RSA_OTHER_PUBLIC)
        .expect("fixture keys")
}

/// Auth configuration with the cheapest bcrypt cost
pub fn test_config() -> AuthConfig {
    AuthConfig::builder()
        .bcrypt_cost(4)
        .build()
        .expect("test config")
}

pub fn test_tokens() -> Arc<TokenService> {
    Arc::new(TokenService::new(Arc::new(test_keys()), 0))
}

pub fn test_state() -> AppState {
    AppState::new(
        Arc::new(InMemoryCredentialStore::new()),
        test_tokens(),
        test_config(),
    )
}

pub fn static_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/static")
}

pub fn test_server() -> TestServer {
    server_with_state(test_state())
}

pub fn server_with_state(state: AppState) -> TestServer {
    TestServer::new(create_router(state, &static_dir())).expect("test server")
}

pub async fn register(server: &TestServer, email: &str, password: &str) -> TestResponse {
    server
        .post("/api/register")
        .json(&json!({ "email": email, "password": password }))
        .await
}

pub async fn login(server: &TestServer, email: &str, password: &str) -> TestResponse {
    server
        .post("/api/login")
        .json(&json!({ "email": email, "password": password }))
        .await
}

/// Register `TEST_EMAIL` and log in, returning the session token
pub async fn signed_in(server: &TestServer) -> String {
    register(server, TEST_EMAIL, TEST_PASSWORD).await;
    session_token(&login(server, TEST_EMAIL, TEST_PASSWORD).await)
}

pub fn set_cookie(response: &TestResponse) -> String {
    response
        .headers()
        .get("set-cookie")
        .expect("Set-Cookie header")
        .to_str()
        .expect("ascii cookie")
        .to_string()
}

/// The value of the `token` cookie a response sets
pub fn session_token(response: &TestResponse) -> String {
    let cookie = set_cookie(response);
    cookie
        .strip_prefix("token=")
        .and_then(|rest| rest.split(';').next())
        .expect("token cookie")
        .to_string()
}

pub fn cookie_header(token: &str) -> String {
    format!("token={}", token)
}

/// Create authorization header value
pub fn auth_header(token: &str) -> String {
    format!("Bearer {}", token)
}
