/**
 * Error Conversion
 *
 * `IntoResponse` for `BackendError`, so handlers can return it directly.
 *
 * # Response Format
 *
 * ```json
 * {
 *   "error": "Validation failed",
 *   "status": 400,
 *   "errors": ["Email is email"]
 * }
 * ```
 *
 * `errors` is only present for validation failures. Server errors are
 * logged here with full detail; the body only ever says
 * "Internal server error".
 */

use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

use crate::backend::error::types::BackendError;

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if self.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }

        let mut body = json!({
            "error": self.message(),
            "status": status.as_u16(),
        });
        let field_errors = self.field_errors();
        if !field_errors.is_empty() {
            body["errors"] = json!(field_errors);
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::auth::users::StoreError;
    use crate::shared::validation::{Constraint, FieldViolation};
    use axum::body::to_bytes;
    use axum::http::StatusCode;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_authentication_failed_body() {
        let response = BackendError::AuthenticationFailed.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            body_json(response).await,
            json!({"error": "Authentication failed", "status": 401})
        );
    }

    #[tokio::test]
    async fn test_validation_body_lists_fields() {
        let error = BackendError::Validation {
            violations: vec![FieldViolation::new("Email", Constraint::Email)],
        };
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({"error": "Validation failed", "status": 400, "errors": ["Email is email"]})
        );
    }

    #[tokio::test]
    async fn test_store_failure_body_is_opaque() {
        let error = BackendError::StoreUnavailable(StoreError::Timeout(Duration::from_secs(5)));
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Internal server error");
        assert!(!body.to_string().contains("exceeded"));
    }

    #[tokio::test]
    async fn test_json_content_type() {
        let response = BackendError::RegistrationFailed.into_response();
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "application/json"
        );
    }
}
