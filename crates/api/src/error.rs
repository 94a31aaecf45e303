use std::any::Any;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use passkeep_core::error::CoreError;
use passkeep_core::validation::FieldError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Every variant renders as `{ "status": "error", "message": ... }`; field
/// validation failures add an `errors` list and internal failures add the
/// underlying `error` text.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            // --- CoreError variants ---
            AppError::Core(CoreError::InvalidFields(errors)) => validation_response(errors),
            AppError::Core(CoreError::Conflict(msg)) => error_response(StatusCode::CONFLICT, msg),

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => error_response(StatusCode::BAD_REQUEST, msg),
            AppError::UnsupportedMediaType(msg) => {
                error_response(StatusCode::UNSUPPORTED_MEDIA_TYPE, msg)
            }
            AppError::InternalError(msg) => internal_response(msg),
        }
    }
}

fn error_response(status: StatusCode, message: String) -> Response {
    let body = json!({
        "status": "error",
        "message": message,
    });
    (status, axum::Json(body)).into_response()
}

fn validation_response(errors: Vec<FieldError>) -> Response {
    let body = json!({
        "status": "error",
        "message": "Validation error",
        "errors": errors,
    });
    (StatusCode::BAD_REQUEST, axum::Json(body)).into_response()
}

fn internal_response(error: String) -> Response {
    tracing::error!(error = %error, "Internal error");
    let body = json!({
        "status": "error",
        "message": "Internal server error",
        "error": error,
    });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response()
}

/// Unique constraint violations map to 409, everything else to 500.
fn classify_sqlx_error(err: sqlx::Error) -> Response {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            tracing::warn!(error = %db_err, "Unique constraint violation");
            return error_response(StatusCode::CONFLICT, "Resource already exists".to_string());
        }
    }
    internal_response(err.to_string())
}

/// Panic handler for `CatchPanicLayer`, rendering the internal error shape.
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "Unknown panic".to_string()
    };

    internal_response(detail)
}
