use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use serde_json::json;

use crate::response::Success;
use crate::state::AppState;

#[derive(Serialize)]
pub struct IndexResponse {
    pub name: &'static str,
    pub version: &'static str,
}

/// Health check response payload.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the database is unreachable.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    pub db_healthy: bool,
}

/// GET / -- service name and version.
pub async fn index() -> Json<Success<IndexResponse>> {
    Json(Success::new(IndexResponse {
        name: "passkeep-api",
        version: env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /health -- returns service and database health.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = passkeep_db::health_check(&state.pool).await.is_ok();

    let status = if db_healthy { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
    })
}

/// Fallback for requests no route matched.
pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "status": "error",
            "message": "Route not found",
        })),
    )
}
