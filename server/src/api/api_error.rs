//! Mapping from core errors to HTTP responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use thiserror::Error;

use phonebook_core::{log_error, log_warn, PhonebookError};

/// Error body returned by every failing endpoint
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
}

impl ErrorResponse {
    /// Create an error body from a message
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}

/// A core error on its way out as an HTTP response
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub PhonebookError);

impl ApiError {
    /// Status code for the wrapped error kind
    pub fn status_code(&self) -> StatusCode {
        match &self.0 {
            PhonebookError::MissingField
            | PhonebookError::DuplicateName { .. }
            | PhonebookError::MalformedIdentifier { .. }
            | PhonebookError::Validation(_) => StatusCode::BAD_REQUEST,
            PhonebookError::NotFound { .. } | PhonebookError::UnknownRoute => StatusCode::NOT_FOUND,
            PhonebookError::Config(_) | PhonebookError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if self.0.is_client_error() {
            log_warn!("Request rejected ({}): {}", status.as_u16(), self.0);
        } else {
            log_error!("Request failed: {}", self.0);
        }

        (status, Json(ErrorResponse::new(self.0.to_string()))).into_response()
    }
}

/// Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;
