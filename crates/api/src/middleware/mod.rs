//! Middlewares attached to route scopes.
//!
//! - [`no_store`] -- forbids caching of responses.
//! - [`require_json`] -- rejects body-carrying requests that are not JSON.

use axum::extract::Request;
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE, PRAGMA};
use axum::http::{HeaderValue, Method};
use axum::middleware::{from_fn, Next};
use axum::response::{IntoResponse, Response};

use crate::error::AppError;
use crate::routing::Middleware;

/// Sets `Cache-Control: no-store` and `Pragma: no-cache` on every response.
pub fn no_store<S>() -> Middleware<S>
where
    S: Clone + Send + Sync + 'static,
{
    Middleware::layer("no_store", from_fn(set_no_store))
}

/// Answers 415 to `POST`, `PUT` and `PATCH` requests without a JSON body.
pub fn require_json<S>() -> Middleware<S>
where
    S: Clone + Send + Sync + 'static,
{
    Middleware::layer("require_json", from_fn(check_json_content_type))
}

async fn set_no_store(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));
    headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
    response
}

async fn check_json_content_type(request: Request, next: Next) -> Response {
    let carries_body = matches!(*request.method(), Method::POST | Method::PUT | Method::PATCH);

    if carries_body && !is_json(&request) {
        return AppError::UnsupportedMediaType("Content-Type must be application/json".into())
            .into_response();
    }

    next.run(request).await
}

/// `application/json`, optionally with parameters such as `charset`.
fn is_json(request: &Request) -> bool {
    request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}
