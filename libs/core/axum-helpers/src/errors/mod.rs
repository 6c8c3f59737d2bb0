pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Standard error response structure.
///
/// Every failure the API reports has the same single-field body.
///
/// # JSON Example
///
/// ```json
/// { "error": "invalid event id: abc" }
/// ```
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error text
    pub error: String,
}

/// Application error type that can be converted to HTTP responses.
///
/// Domain crates convert their own error enums into this type; rendering
/// emits one tracing event tagged with the numeric `error_code`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("{0}")]
    InvalidIdentifier(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Database(String),
}

impl AppError {
    /// Status code and log code for this error.
    ///
    /// Undecodable request bodies arrive as `BadRequest`, so they report 400
    /// whatever status axum would pick for the rejection (415 for a missing
    /// content type, 422 for a shape mismatch).
    pub fn status_and_code(&self) -> (StatusCode, ErrorCode) {
        match self {
            AppError::InvalidIdentifier(_) => {
                (StatusCode::BAD_REQUEST, ErrorCode::InvalidIdentifier)
            }
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, ErrorCode::BadRequest),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, ErrorCode::NotFound),
            AppError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::DatabaseError),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let message = self.to_string();

        match &self {
            AppError::BadRequest(_) | AppError::InvalidIdentifier(_) => {
                tracing::warn!(error_code = code.code(), "{}: {}", code, message);
            }
            AppError::NotFound(_) => {
                tracing::info!(error_code = code.code(), "{}: {}", code, message);
            }
            AppError::Database(_) => {
                tracing::error!(error_code = code.code(), "{}: {}", code, message);
            }
        }

        error_response(status, message)
    }
}

/// Helper function to create error responses.
///
/// # Example
///
/// ```rust,ignore
/// use axum_helpers::errors::error_response;
/// use axum::http::StatusCode;
///
/// let response = error_response(StatusCode::BAD_REQUEST, "Invalid input".to_string());
/// ```
pub fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(ErrorResponse { error: message })).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_bad_request_renders_error_field() {
        let response = AppError::InvalidIdentifier("invalid event id: abc".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json, serde_json::json!({ "error": "invalid event id: abc" }));
    }

    #[tokio::test]
    async fn test_not_found_status() {
        let response = AppError::NotFound("event not found".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"], "event not found");
    }

    #[tokio::test]
    async fn test_database_error_is_500() {
        let response = AppError::Database("connection refused".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["error"], "connection refused");
    }

    #[tokio::test]
    async fn test_bad_request_renders_message() {
        let response = AppError::BadRequest("expected a JSON object".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "expected a JSON object");
    }

    #[test]
    fn test_status_and_code_mapping() {
        assert_eq!(
            AppError::BadRequest("x".into()).status_and_code(),
            (StatusCode::BAD_REQUEST, ErrorCode::BadRequest)
        );
        assert_eq!(
            AppError::Database("x".into()).status_and_code(),
            (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::DatabaseError)
        );
    }
}
