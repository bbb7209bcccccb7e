use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::{json, Value};
use uuid::Uuid;

use lockstash_cache::CacheError;
use lockstash_core::crypto::CryptoError;
use lockstash_core::error::CoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds infrastructure variants.
/// Implements [`IntoResponse`] to produce the uniform JSON error envelope
/// `{detail, error_code, event_id, additional_info}`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `lockstash_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// An access-cache error.
    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    /// A record-content encryption/decryption error.
    #[error("Crypto error: {0}")]
    Crypto(#[from] CryptoError),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// Wire shape of every error response.
#[derive(Debug, Serialize)]
struct ErrorBody {
    detail: String,
    error_code: &'static str,
    /// Random correlation id, loggable and quotable to support. The all-zero
    /// id marks validation errors, which are not individually tracked.
    event_id: Uuid,
    additional_info: Value,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let event_id = match &self {
            AppError::Core(CoreError::Validation(_)) => Uuid::nil(),
            _ => Uuid::new_v4(),
        };

        let (status, code, detail, additional_info) = match &self {
            AppError::Core(core) => classify_core_error(core, event_id),
            AppError::Database(err) => classify_sqlx_error(err, event_id),
            AppError::Cache(err) => {
                tracing::error!(%event_id, error = %err, "Access cache error");
                internal_tuple()
            }
            AppError::Crypto(err) => {
                tracing::error!(%event_id, error = %err, "Record crypto error");
                internal_tuple()
            }
            AppError::InternalError(msg) => {
                tracing::error!(%event_id, error = %msg, "Internal error");
                internal_tuple()
            }
        };

        let body = ErrorBody {
            detail,
            error_code: code,
            event_id,
            additional_info,
        };

        (status, axum::Json(body)).into_response()
    }
}

/// Map a domain error to its status, stable code, public detail, and
/// additional info.
fn classify_core_error(
    err: &CoreError,
    event_id: Uuid,
) -> (StatusCode, &'static str, String, Value) {
    let empty = json!({});
    match err {
        CoreError::BadAuthData => (
            StatusCode::UNAUTHORIZED,
            "BAD_AUTH_DATA",
            err.to_string(),
            empty,
        ),
        CoreError::BadFingerprint => (
            StatusCode::UNAUTHORIZED,
            "BAD_FINGERPRINT",
            err.to_string(),
            empty,
        ),
        CoreError::AuthSessionNotFound => (
            StatusCode::NOT_FOUND,
            "AUTH_SESSION_NOT_FOUND",
            err.to_string(),
            empty,
        ),
        CoreError::AuthSessionDeleted => (
            StatusCode::CONFLICT,
            "AUTH_SESSION_DELETED",
            err.to_string(),
            empty,
        ),
        CoreError::UserNotFound => (
            StatusCode::NOT_FOUND,
            "USER_NOT_FOUND",
            err.to_string(),
            empty,
        ),
        CoreError::UserDeleted => (
            StatusCode::CONFLICT,
            "USER_DELETED",
            err.to_string(),
            empty,
        ),
        CoreError::UserEmailAlreadyExists { email } => (
            StatusCode::CONFLICT,
            "USER_EMAIL_ALREADY_EXISTS",
            err.to_string(),
            json!({ "email": email }),
        ),
        CoreError::FolderNotFound { folder_id } => (
            StatusCode::NOT_FOUND,
            "FOLDER_NOT_FOUND",
            err.to_string(),
            json!({ "folder_id": folder_id }),
        ),
        CoreError::RecordNotFound { record_id } => (
            StatusCode::NOT_FOUND,
            "RECORD_NOT_FOUND",
            err.to_string(),
            json!({ "record_id": record_id }),
        ),
        CoreError::Unauthorized(msg) => (
            StatusCode::UNAUTHORIZED,
            "UNAUTHORIZED",
            msg.clone(),
            empty,
        ),
        CoreError::Validation(msg) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            "VALIDATION_ERROR",
            msg.clone(),
            empty,
        ),
        CoreError::Internal(msg) => {
            tracing::error!(%event_id, error = %msg, "Internal core error");
            internal_tuple()
        }
    }
}

/// Classify a sqlx error into the envelope tuple.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`)
///   map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(
    err: &sqlx::Error,
    event_id: Uuid,
) -> (StatusCode, &'static str, String, Value) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
            json!({}),
        ),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                        json!({ "constraint": constraint }),
                    );
                }
            }
            tracing::error!(%event_id, error = %db_err, "Database error");
            internal_tuple()
        }
        other => {
            tracing::error!(%event_id, error = %other, "Database error");
            internal_tuple()
        }
    }
}

/// The generic 500 tuple. Details never reach the client; they are traced
/// with the event id instead.
fn internal_tuple() -> (StatusCode, &'static str, String, Value) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
        json!({}),
    )
}
