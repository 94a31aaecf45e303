//! Tests for `AppError` → HTTP response mapping.
//!
//! These call `IntoResponse` directly on `AppError` values; no server or
//! database is involved.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use passkeep_api::error::{handle_panic, AppError};
use passkeep_core::error::CoreError;
use passkeep_core::validation::FieldError;
use serde_json::json;

/// Helper: convert a response into its status code and parsed JSON body.
async fn into_parts(response: axum::response::Response) -> (StatusCode, serde_json::Value) {
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    into_parts(err.into_response()).await
}

// ---------------------------------------------------------------------------
// Test: field errors map to 400 with the errors list
// ---------------------------------------------------------------------------

#[tokio::test]
async fn invalid_fields_return_400_with_errors() {
    let err = AppError::Core(CoreError::InvalidFields(vec![
        FieldError::new("service", "Service is required"),
        FieldError::new("id", "User ID is required"),
    ]));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json,
        json!({
            "status": "error",
            "message": "Validation error",
            "errors": [
                { "path": "service", "message": "Service is required" },
                { "path": "id", "message": "User ID is required" }
            ]
        })
    );
}

// ---------------------------------------------------------------------------
// Test: conflicts map to 409
// ---------------------------------------------------------------------------

#[tokio::test]
async fn conflict_error_returns_409() {
    let err = AppError::Core(CoreError::Conflict("User already exists".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json, json!({ "status": "error", "message": "User already exists" }));
}

// ---------------------------------------------------------------------------
// Test: HTTP-specific variants
// ---------------------------------------------------------------------------

#[tokio::test]
async fn bad_request_error_returns_400() {
    let (status, json) = error_to_response(AppError::BadRequest("invalid JSON".into())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "invalid JSON");
    assert!(json.get("errors").is_none());
}

#[tokio::test]
async fn unsupported_media_type_returns_415() {
    let err = AppError::UnsupportedMediaType("Content-Type must be application/json".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(json["status"], "error");
}

// ---------------------------------------------------------------------------
// Test: internal failures map to 500 and carry the error text
// ---------------------------------------------------------------------------

#[tokio::test]
async fn internal_error_returns_500_with_detail() {
    let (status, json) =
        error_to_response(AppError::InternalError("disk full".into())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json,
        json!({
            "status": "error",
            "message": "Internal server error",
            "error": "disk full"
        })
    );
}

#[tokio::test]
async fn database_error_returns_500() {
    let (status, json) = error_to_response(AppError::Database(sqlx::Error::PoolClosed)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["message"], "Internal server error");
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn panic_payloads_render_as_internal_errors() {
    let (status, json) = into_parts(handle_panic(Box::new("boom"))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "boom");

    let (_, json) = into_parts(handle_panic(Box::new(String::from("owned boom")))).await;
    assert_eq!(json["error"], "owned boom");

    let (_, json) = into_parts(handle_panic(Box::new(42_u8))).await;
    assert_eq!(json["error"], "Unknown panic");
}
