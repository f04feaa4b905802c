//! HTTP boundary error type.
//!
//! ## Error Flow
//! ```text
//! ValidationError ─┐
//! CoreError ───────┼──► ApiError ──► (StatusCode, {"message": "..."})
//! DbError ─────────┘
//! ```
//!
//! Every response body is `{"message": "..."}`. Storage internals are
//! logged server-side and surfaced to clients as a generic message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use spicetable_core::{CoreError, ValidationError};
use spicetable_db::DbError;

/// API request errors, mapped to HTTP status codes.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or invalid request payload (400).
    #[error("{0}")]
    BadRequest(String),

    /// Missing or invalid session (401).
    #[error("{0}")]
    Unauthorized(String),

    /// Authenticated but not permitted (403).
    #[error("{0}")]
    Forbidden(String),

    /// Entity does not exist (404).
    #[error("{0}")]
    NotFound(String),

    /// Request conflicts with current state (409).
    #[error("{0}")]
    Conflict(String),

    /// Unexpected server-side failure (500, details logged only).
    #[error("Internal server error")]
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message sent to the client. Internal details never leave the
    /// server.
    fn client_message(&self) -> String {
        match self {
            ApiError::Internal(details) => {
                error!(%details, "Internal server error");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({ "message": self.client_message() }));
        (status, body).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::OrderNotFound(_) | CoreError::MenuItemNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            CoreError::InvalidStatusTransition { .. }
            | CoreError::InvalidPaymentTransition { .. } => ApiError::Conflict(err.to_string()),
            CoreError::Validation(inner) => inner.into(),
        }
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { ref entity, ref id } => {
                ApiError::NotFound(format!("{entity} not found: {id}"))
            }
            DbError::UniqueViolation { .. } => ApiError::Conflict(err.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

/// Result type for HTTP handlers and services.
pub type ApiResult<T> = Result<T, ApiError>;
