//! Application error type and its HTTP representation.
//!
//! Every error that leaves the service layer is an [`AppError`]. Store adapters
//! report [`StoreError`](crate::domain::repositories::StoreError), which the
//! allocator inspects before anything is converted here.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::repositories::StoreError;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error description returned to API clients.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Errors surfaced by the link services and HTTP handlers.
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing, non-string or empty target URL.
    #[error("{message}")]
    InvalidInput { message: String, details: Value },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// The stored target cannot be sent as a `Location` header.
    #[error("{message}")]
    InvalidTarget { message: String, details: Value },

    /// The record store failed for a reason other than a code collision.
    #[error("Store unavailable: {message}")]
    StoreUnavailable { message: String, details: Value },

    /// Every allocation attempt hit an existing code.
    #[error("Failed to allocate a unique short code after {attempts} attempts")]
    ExhaustedRetries { attempts: usize },
}

impl AppError {
    pub fn invalid_input(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidInput {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn invalid_target(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidTarget {
            message: message.into(),
            details,
        }
    }

    pub fn store_unavailable(message: impl Into<String>, details: Value) -> Self {
        Self::StoreUnavailable {
            message: message.into(),
            details,
        }
    }

    /// HTTP status code for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::InvalidTarget { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::StoreUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::ExhaustedRetries { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converts the error into the JSON structure sent to clients.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (code, details) = match self {
            Self::InvalidInput { details, .. } => ("invalid_input", details.clone()),
            Self::NotFound { details, .. } => ("not_found", details.clone()),
            Self::InvalidTarget { details, .. } => ("invalid_target", details.clone()),
            Self::StoreUnavailable { details, .. } => ("store_unavailable", details.clone()),
            Self::ExhaustedRetries { attempts } => {
                ("exhausted_retries", json!({ "attempts": attempts }))
            }
        };

        ErrorInfo {
            code,
            message: self.to_string(),
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(reason) => {
                AppError::store_unavailable("Record store error", json!({ "reason": reason }))
            }
            StoreError::UniqueViolation(code) => AppError::store_unavailable(
                "Unexpected unique constraint violation",
                json!({ "code": code }),
            ),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let details = serde_json::to_value(errors.field_errors()).unwrap_or(Value::Null);
        AppError::invalid_input("Request validation failed", details)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::invalid_input(
            "Invalid request body",
            json!({ "reason": rejection.body_text() }),
        )
    }
}
