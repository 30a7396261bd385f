use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use coopsite_core::error::CoreError;
use serde_json::json;

use crate::response::ErrorEnvelope;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce the standard error envelope.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `coopsite_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

// Extractor rejections surface as 400 envelopes instead of axum's plain-text
// bodies. Handlers take `Result<Json<T>, JsonRejection>` and apply `?`.

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

const INTERNAL_MESSAGE: &str = "An internal error occurred";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, envelope) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    ErrorEnvelope::new(format!("{entity} with id {id} not found"), "NOT_FOUND"),
                ),
                CoreError::Validation(msg) => (
                    StatusCode::BAD_REQUEST,
                    ErrorEnvelope::new(msg.clone(), "VALIDATION_ERROR"),
                ),
                CoreError::InvalidField { field, message } => (
                    StatusCode::BAD_REQUEST,
                    ErrorEnvelope::new(message.clone(), "VALIDATION_ERROR")
                        .with_details(json!({ "field": field })),
                ),
                CoreError::Forbidden(msg) => {
                    tracing::warn!(reason = %msg, "Forbidden request");
                    (
                        StatusCode::FORBIDDEN,
                        ErrorEnvelope::new(msg.clone(), "FORBIDDEN"),
                    )
                }
                CoreError::PathTraversal(path) => {
                    tracing::warn!(path = %path, "Path traversal attempt rejected");
                    (
                        StatusCode::FORBIDDEN,
                        ErrorEnvelope::new("Access to the requested path is forbidden", "FORBIDDEN"),
                    )
                }
                CoreError::TooLarge { size, limit } => (
                    StatusCode::PAYLOAD_TOO_LARGE,
                    ErrorEnvelope::new(
                        format!("File is {size} bytes, the limit is {limit} bytes"),
                        "PAYLOAD_TOO_LARGE",
                    ),
                ),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        ErrorEnvelope::new(INTERNAL_MESSAGE, "INTERNAL_ERROR"),
                    )
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorEnvelope::new(msg.clone(), "BAD_REQUEST"),
            ),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorEnvelope::new(INTERNAL_MESSAGE, "INTERNAL_ERROR"),
                )
            }
        };

        (status, axum::Json(envelope)).into_response()
    }
}

/// Classify a sqlx error into an HTTP status and error envelope.
///
/// - `RowNotFound` maps to 404.
/// - Pool exhaustion, a closed pool, and connection I/O failures map to 503.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, ErrorEnvelope) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            ErrorEnvelope::new("Resource not found", "NOT_FOUND"),
        ),
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) | sqlx::Error::Tls(_) => {
            tracing::error!(error = %err, "Database unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorEnvelope::new(
                    "The service is temporarily unavailable",
                    "SERVICE_UNAVAILABLE",
                ),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorEnvelope::new(INTERNAL_MESSAGE, "INTERNAL_ERROR"),
            )
        }
    }
}
