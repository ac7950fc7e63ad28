//! Error handling module
//!
//! Centralized error types and HTTP response conversion.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::document::DocumentError;
use crate::domain::DomainError;
use crate::storage::StorageError;

/// Application-wide Result type
pub type AppResult<T> = Result<T, AppError>;

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Domain errors (4xx)
    #[error(transparent)]
    Domain(#[from] DomainError),

    // Server errors (5xx)
    #[error("Storage error: {0}")]
    Storage(StorageError),

    #[error("Document error: {0}")]
    Document(#[from] DocumentError),
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Domain(domain) => AppError::Domain(domain),
            other => AppError::Storage(other),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Domain(DomainError::malformed(rejection.body_text()))
    }
}

impl AppError {
    /// HTTP status this error is reported with
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Domain(DomainError::Validation(_)) => StatusCode::BAD_REQUEST,
            AppError::Domain(DomainError::EmployeeNotFound(_) | DomainError::NotFound(_)) => {
                StatusCode::NOT_FOUND
            }
            AppError::Domain(DomainError::MalformedData(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Storage(_) | AppError::Document(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (error_code, details) = match &self {
            // Domain errors - map to appropriate HTTP status
            AppError::Domain(domain_err) => match domain_err {
                DomainError::Validation(msg) => ("validation_error", Some(msg.clone())),
                DomainError::EmployeeNotFound(id) => ("not_found", Some(id.clone())),
                DomainError::NotFound(what) => ("not_found", Some(what.clone())),
                DomainError::MalformedData(msg) => ("malformed_data", Some(msg.clone())),
            },

            // 500 Internal Server Error
            AppError::Storage(e) => {
                tracing::error!("Storage error: {:?}", e);
                ("storage_error", None)
            }
            AppError::Document(e) => {
                tracing::error!("Document error: {:?}", e);
                ("document_error", None)
            }
        };

        let status = self.status();
        let error = if status.is_server_error() {
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        let body = ErrorResponse {
            error,
            error_code: error_code.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}
