//! # API Errors
//!
//! Error types for the HTTP layer. Internally tagged; externally each
//! variant keeps the wire contract: 404 and 400 respond with a `message`
//! body, 500 forwards the underlying error text in an `error` body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::store::StoreError;

/// Result type for route handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// HTTP-facing errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// Requested key does not resolve to a stored item
    #[error("Item not found")]
    NotFound,

    /// Delete request's key is not a structurally valid storage key
    #[error("Invalid item ID")]
    InvalidItemId,

    /// Everything else, forwarded to the client as raw text
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::InvalidItemId => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => ApiError::NotFound,
            // GET and PUT do not pre-validate key shape; a malformed key
            // surfaces like any other query failure. Only the delete
            // handler maps it to InvalidItemId, before calling the store.
            StoreError::InvalidKey(e) => ApiError::Internal(e.to_string()),
            StoreError::Duplicate(message) => ApiError::Internal(message),
            StoreError::Database(e) => ApiError::Internal(e.to_string()),
        }
    }
}

/// Body for 404/400 responses and for delete confirmation
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Body for 500 responses: the underlying error text, verbatim
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            ApiError::NotFound | ApiError::InvalidItemId => {
                (status, Json(MessageResponse::new(self.to_string()))).into_response()
            }
            ApiError::Internal(error) => {
                (status, Json(ErrorResponse { error })).into_response()
            }
        }
    }
}
