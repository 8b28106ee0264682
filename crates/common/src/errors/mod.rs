//! Error types for PaperLens
//!
//! Provides a small error handling system with:
//! - Distinct error types for different failure modes
//! - HTTP status code mapping
//! - Structured error responses
//! - Error codes for client handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

/// Error codes for machine-readable error identification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Validation errors (1xxx)
    ValidationError,
    InvalidQuery,
    InvalidPageSize,

    // Resource errors (4xxx)
    NotFound,
    PaperNotFound,

    // Data errors (7xxx)
    DataLoadError,

    // Internal errors (9xxx)
    InternalError,
    ConfigurationError,
}

impl ErrorCode {
    /// Get the numeric code for this error
    pub fn as_code(&self) -> u16 {
        match self {
            // Validation (1xxx)
            ErrorCode::ValidationError => 1001,
            ErrorCode::InvalidQuery => 1002,
            ErrorCode::InvalidPageSize => 1003,

            // Resources (4xxx)
            ErrorCode::NotFound => 4001,
            ErrorCode::PaperNotFound => 4002,

            // Data (7xxx)
            ErrorCode::DataLoadError => 7001,

            // Internal (9xxx)
            ErrorCode::InternalError => 9001,
            ErrorCode::ConfigurationError => 9002,
        }
    }
}

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation failed: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// Query-shape error caught before filtering runs.
    #[error("Invalid query: {field}: {message}")]
    InvalidQuery { field: String, message: String },

    #[error("Invalid page size: {page_size} (must be at least 1)")]
    InvalidPageSize { page_size: usize },

    // Resource errors
    #[error("Paper not found: {id}")]
    PaperNotFound { id: String },

    /// Malformed or missing dataset. Fatal at startup; there is no
    /// partial-load recovery.
    #[error("Dataset error: {message}")]
    DataLoad { message: String },

    // Internal errors
    #[error("Internal server error: {message}")]
    Internal { message: String },

    #[error("Configuration error: {0}")]
    Configuration(#[from] config::ConfigError),
}

impl AppError {
    /// Get the error code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { .. } => ErrorCode::ValidationError,
            AppError::InvalidQuery { .. } => ErrorCode::InvalidQuery,
            AppError::InvalidPageSize { .. } => ErrorCode::InvalidPageSize,
            AppError::PaperNotFound { .. } => ErrorCode::PaperNotFound,
            AppError::DataLoad { .. } => ErrorCode::DataLoadError,
            AppError::Internal { .. } => ErrorCode::InternalError,
            AppError::Configuration(_) => ErrorCode::ConfigurationError,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            AppError::Validation { .. }
            | AppError::InvalidQuery { .. }
            | AppError::InvalidPageSize { .. } => StatusCode::BAD_REQUEST,

            // 404 Not Found
            AppError::PaperNotFound { .. } => StatusCode::NOT_FOUND,

            // 500 Internal Server Error
            AppError::DataLoad { .. }
            | AppError::Internal { .. }
            | AppError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Check if this error should be logged at error level
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }

    /// Check if this error is a client error
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}

/// Structured error response for API
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetails,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();
        let message = self.to_string();

        // Log based on severity
        if self.is_server_error() {
            tracing::error!(
                error = %message,
                code = ?code,
                status = status.as_u16(),
                "Server error"
            );
        } else if self.is_client_error() {
            tracing::warn!(
                error = %message,
                code = ?code,
                status = status.as_u16(),
                "Client error"
            );
        }

        let field = match self {
            AppError::Validation { field, .. } => field,
            AppError::InvalidQuery { field, .. } => Some(field),
            AppError::InvalidPageSize { .. } => Some("page_size".to_string()),
            _ => None,
        };

        let body = ErrorResponse {
            error: ErrorDetails {
                code,
                message,
                field,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal {
            message: err.to_string(),
        }
    }
}
