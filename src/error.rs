//! Application error type and its HTTP representation.
//!
//! Every fallible operation in the service returns [`AppError`]. Handlers
//! propagate it with `?` and Axum renders it through [`IntoResponse`] as:
//!
//! ```json
//! { "statusCode": 404, "message": "Short URL not found", "error": "Not Found" }
//! ```
//!
//! `message` is either a single string or a list of strings (validation
//! failures report one entry per violated rule).

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::fmt;
use validator::ValidationErrors;

/// Error message payload: a single sentence or a list of validation messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ErrorMessage {
    Single(String),
    List(Vec<String>),
}

impl fmt::Display for ErrorMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(message) => f.write_str(message),
            Self::List(messages) => f.write_str(&messages.join("; ")),
        }
    }
}

/// JSON body of every error response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub status_code: u16,
    pub message: ErrorMessage,
    pub error: &'static str,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Submitted value failed validation.
    #[error("{0}")]
    InvalidInput(ErrorMessage),

    /// No mapping exists for the requested short code.
    #[error("{message}")]
    NotFound { message: String },

    /// The store's unique index rejected a short code on insert.
    #[error("Short code '{code}' is already taken")]
    CodeCollision { code: String },

    /// The uniqueness resolver ran out of attempts. Safe to retry.
    #[error("{message}")]
    CapacityExhausted { message: String },

    /// The database could not be reached or failed the query.
    #[error("Storage unavailable: {message}")]
    StoreUnavailable { message: String },

    #[error("{message}")]
    Internal { message: String },
}

impl AppError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(ErrorMessage::Single(message.into()))
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn capacity_exhausted() -> Self {
        Self::CapacityExhausted {
            message: "Unable to generate unique short code. Please try again.".to_string(),
        }
    }

    pub fn store_unavailable(message: impl Into<String>) -> Self {
        Self::StoreUnavailable {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// HTTP status the error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::CodeCollision { .. } | Self::CapacityExhausted { .. } => StatusCode::CONFLICT,
            Self::StoreUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether repeating the same storage call may succeed.
    ///
    /// Used by the click worker to decide whether to back off and retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::StoreUnavailable { .. })
    }

    /// Builds the client-facing body. Storage and internal details stay in the logs.
    pub fn to_body(&self) -> ErrorBody {
        let status = self.status_code();

        let message = match self {
            Self::InvalidInput(message) => message.clone(),
            Self::StoreUnavailable { .. } => {
                ErrorMessage::Single("Service temporarily unavailable".to_string())
            }
            Self::Internal { .. } => ErrorMessage::Single("Internal server error".to_string()),
            other => ErrorMessage::Single(other.to_string()),
        };

        ErrorBody {
            status_code: status.as_u16(),
            message,
            error: status.canonical_reason().unwrap_or("Error"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            Self::StoreUnavailable { message } | Self::Internal { message } => {
                tracing::error!(error = %message, "Request failed");
            }
            _ => tracing::debug!(error = %self, "Request rejected"),
        }

        (self.status_code(), Json(self.to_body())).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        tracing::warn!(error = %e, "Database operation failed");
        Self::store_unavailable(e.to_string())
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{field} is invalid"))
                })
            })
            .collect();
        messages.sort();

        Self::InvalidInput(ErrorMessage::List(messages))
    }
}
