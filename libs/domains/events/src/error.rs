//! Event domain error types

use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

use crate::id::EventId;

/// Result type for event operations
pub type EventResult<T> = Result<T, EventError>;

/// Event domain errors
#[derive(Debug, Error)]
pub enum EventError {
    /// Path identifier is not a 24-character hex ObjectId
    #[error("invalid event id: {0}")]
    InvalidIdentifier(String),

    /// Request body is not a JSON object of the expected shape
    #[error("malformed request body: {0}")]
    MalformedBody(String),

    /// Record absent when re-read after an update
    #[error("event {0} not found")]
    NotFound(EventId),

    /// Store unavailable, driver failure, or a record missing after insert
    #[error("{0}")]
    Store(String),
}

impl From<JsonRejection> for EventError {
    fn from(rejection: JsonRejection) -> Self {
        EventError::MalformedBody(rejection.body_text())
    }
}

impl From<serde_json::Error> for EventError {
    fn from(err: serde_json::Error) -> Self {
        EventError::MalformedBody(err.to_string())
    }
}

impl From<mongodb::error::Error> for EventError {
    fn from(err: mongodb::error::Error) -> Self {
        EventError::Store(err.to_string())
    }
}

/// Convert EventError to AppError for standardized error responses
impl From<EventError> for AppError {
    fn from(err: EventError) -> Self {
        match err {
            EventError::InvalidIdentifier(_) => AppError::InvalidIdentifier(err.to_string()),
            EventError::MalformedBody(_) => AppError::BadRequest(err.to_string()),
            EventError::NotFound(_) => AppError::NotFound(err.to_string()),
            EventError::Store(msg) => AppError::Database(msg),
        }
    }
}

impl IntoResponse for EventError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_per_kind() {
        let cases = [
            (
                EventError::InvalidIdentifier("abc".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                EventError::MalformedBody("expected a JSON object".into()),
                StatusCode::BAD_REQUEST,
            ),
            (EventError::NotFound(EventId::new()), StatusCode::NOT_FOUND),
            (
                EventError::Store("connection reset".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_invalid_identifier_message() {
        let err = EventError::InvalidIdentifier("abc".into());
        assert_eq!(err.to_string(), "invalid event id: abc");
    }

    #[test]
    fn test_malformed_body_message() {
        let err: EventError = serde_json::from_str::<serde_json::Value>("{broken")
            .map_err(EventError::from)
            .unwrap_err();
        assert!(err.to_string().starts_with("malformed request body: "));
    }
}
