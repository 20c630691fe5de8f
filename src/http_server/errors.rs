//! # HTTP API Errors
//!
//! Error types for the HTTP layer and their JSON envelope rendering.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::books::BookError;

use super::envelope::ErrorEnvelope;

/// Result type for HTTP handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// HTTP API errors
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Error raised by the book store
    #[error(transparent)]
    Book(#[from] BookError),

    // ==================
    // Client Errors (4xx)
    // ==================
    /// Body could not be decoded into the expected shape
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// No route for this method and path
    #[error("Cannot {method} {path}")]
    RouteNotFound { method: String, path: String },

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Unexpected fault while serving the request
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Book(BookError::Validation(_)) => StatusCode::BAD_REQUEST,
            ApiError::Book(BookError::NoUpdateFields) => StatusCode::BAD_REQUEST,
            ApiError::Book(BookError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Book(BookError::Internal(_)) => StatusCode::INTERNAL_SERVER_ERROR,

            ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::RouteNotFound { .. } => StatusCode::NOT_FOUND,

            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Build the envelope sent to the client
    pub fn envelope(&self) -> ErrorEnvelope {
        match self {
            ApiError::Book(BookError::Validation(messages)) => {
                ErrorEnvelope::new("Validation failed").with_messages(messages.clone())
            }
            ApiError::Book(BookError::NoUpdateFields) => ErrorEnvelope::new("No data provided")
                .with_message(
                    "Please provide at least one field to update (title, author, year, or genre)",
                ),
            ApiError::Book(BookError::NotFound(id)) => ErrorEnvelope::new("Book not found")
                .with_message(format!("No book found with ID: {}", id)),
            ApiError::Book(BookError::Internal(msg)) | ApiError::Internal(msg) => {
                ErrorEnvelope::new("Internal server error").with_message(msg.clone())
            }
            ApiError::InvalidBody(msg) => {
                ErrorEnvelope::new("Invalid request body").with_message(msg.clone())
            }
            ApiError::RouteNotFound { .. } => {
                ErrorEnvelope::new("Route not found").with_message(self.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "request rejected");
        }
        (status, Json(self.envelope())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::from(BookError::invalid("Title is required")).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(BookError::NoUpdateFields).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(BookError::NotFound("9".into())).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::RouteNotFound {
                method: "GET".into(),
                path: "/nope".into()
            }
            .status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(BookError::Internal("lock".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_not_found_envelope() {
        let envelope = ApiError::from(BookError::NotFound("42".into())).envelope();
        assert!(!envelope.success);
        assert_eq!(envelope.error, "Book not found");
        assert_eq!(envelope.message.as_deref(), Some("No book found with ID: 42"));
    }

    #[test]
    fn test_route_not_found_envelope() {
        let envelope = ApiError::RouteNotFound {
            method: "PATCH".into(),
            path: "/books/1".into(),
        }
        .envelope();
        assert_eq!(envelope.error, "Route not found");
        assert_eq!(envelope.message.as_deref(), Some("Cannot PATCH /books/1"));
    }

    #[test]
    fn test_internal_envelope_carries_fault_message() {
        let envelope = ApiError::Internal("boom".into()).envelope();
        assert_eq!(envelope.error, "Internal server error");
        assert_eq!(envelope.message.as_deref(), Some("boom"));
    }
}
