#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use tower::ServiceExt;

use passkeep_api::config::ServerConfig;
use passkeep_api::router::build_app_router;
use passkeep_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: "sqlite::memory:".to_string(),
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
    }
}

/// Build the full application router on top of the given pool, through the
/// same [`build_app_router`] the binary uses.
pub fn build_test_app(pool: SqlitePool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config).expect("route declarations must resolve")
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    post_raw(app, uri, Some("application/json"), body.to_string()).await
}

/// POST an arbitrary body, with an optional `Content-Type`.
pub async fn post_raw(
    app: Router,
    uri: &str,
    content_type: Option<&str>,
    body: impl Into<String>,
) -> Response<Body> {
    let mut builder = Request::builder().method(Method::POST).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header("content-type", content_type);
    }
    send(app, builder.body(Body::from(body.into())).unwrap()).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body must be JSON")
}

/// Insert a user linked to `(provider, provider_id)` directly in SQL.
pub async fn seed_provider(pool: &SqlitePool, provider: &str, provider_id: &str) -> i64 {
    let (user_id,): (i64,) = sqlx::query_as(
        "INSERT INTO users (uid, name) VALUES (?1, ?2) RETURNING id",
    )
    .bind(format!("seed-{provider}-{provider_id}"))
    .bind("Seeded User")
    .fetch_one(pool)
    .await
    .unwrap();

    sqlx::query("INSERT INTO auth_providers (userId, provider, providerId) VALUES (?1, ?2, ?3)")
        .bind(user_id)
        .bind(provider)
        .bind(provider_id)
        .execute(pool)
        .await
        .unwrap();

    user_id
}
