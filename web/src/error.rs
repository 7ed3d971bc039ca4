//! Error types for web handlers.
//!
//! This module bridges the domain error taxonomy and HTTP responses,
//! implementing Axum's `IntoResponse` trait. Every error renders a JSON
//! body of the shape `{ "message": string }`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use slotboard_core::SlotboardError;
use std::fmt;

/// Application error type for web handlers.
///
/// Wraps domain errors with the HTTP status they map to. Handlers mostly
/// produce this via `?` on [`SlotboardError`] results.
#[derive(Debug)]
pub struct AppError {
    /// HTTP status code
    status: StatusCode,
    /// Error message (user-facing)
    message: String,
    /// Internal error (for logging, not exposed to client)
    #[allow(dead_code)]
    source: Option<anyhow::Error>,
}

impl AppError {
    /// Create a new application error.
    #[must_use]
    pub const fn new(status: StatusCode, message: String) -> Self {
        Self {
            status,
            message,
            source: None,
        }
    }

    /// Create a new error with a source error.
    #[must_use]
    pub fn with_source(mut self, source: anyhow::Error) -> Self {
        self.source = Some(source);
        self
    }

    /// Create a 400 Bad Request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message.into())
    }

    /// Create a 401 Unauthorized error.
    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message.into())
    }

    /// Create a 403 Forbidden error.
    #[must_use]
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message.into())
    }

    /// Create a 404 Not Found error.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message.into())
    }

    /// Create a 405 Method Not Allowed error.
    #[must_use]
    pub fn method_not_allowed() -> Self {
        Self::new(
            StatusCode::METHOD_NOT_ALLOWED,
            "method not allowed".to_string(),
        )
    }

    /// Create a 409 Conflict error.
    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message.into())
    }

    /// Create a 500 Internal Server Error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message.into())
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.status, self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Error response body (JSON).
#[derive(Debug, Serialize)]
struct ErrorResponse {
    /// Human-readable error message.
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log internal errors
        if self.status.is_server_error() {
            tracing::error!(
                status = %self.status,
                message = %self.message,
                "Internal server error"
            );
        }

        let body = ErrorResponse {
            message: self.message,
        };

        (self.status, Json(body)).into_response()
    }
}

impl From<SlotboardError> for AppError {
    fn from(err: SlotboardError) -> Self {
        let status = match &err {
            SlotboardError::NotFound(_) => StatusCode::NOT_FOUND,
            SlotboardError::Forbidden(_) => StatusCode::FORBIDDEN,
            SlotboardError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            SlotboardError::BadRequest(_) => StatusCode::BAD_REQUEST,
            SlotboardError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            SlotboardError::Conflict(_) => StatusCode::CONFLICT,
            SlotboardError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, err.to_string())
    }
}

/// Convert `anyhow::Error` to `AppError`.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::internal("An internal error occurred").with_source(err)
    }
}

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AppError::bad_request("Invalid input");
        assert_eq!(err.to_string(), "[400 Bad Request] Invalid input");
    }

    #[test]
    fn test_taxonomy_maps_onto_statuses() {
        let cases = [
            (SlotboardError::not_found("x"), StatusCode::NOT_FOUND),
            (SlotboardError::forbidden("x"), StatusCode::FORBIDDEN),
            (SlotboardError::unauthorized("x"), StatusCode::UNAUTHORIZED),
            (SlotboardError::bad_request("x"), StatusCode::BAD_REQUEST),
            (
                SlotboardError::MethodNotAllowed,
                StatusCode::METHOD_NOT_ALLOWED,
            ),
            (SlotboardError::conflict("x"), StatusCode::CONFLICT),
            (
                SlotboardError::internal("x"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(AppError::from(err).status, status);
        }
    }

    #[test]
    fn test_internal_message_is_carried() {
        let err = AppError::from(SlotboardError::internal("forum unreachable"));
        assert_eq!(err.message, "internal error: forum unreachable");
    }
}
