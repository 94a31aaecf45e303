//! Linked identity-provider account model and DTOs.

use passkeep_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `auth_providers` table.
///
/// `(provider, provider_id)` is unique: one external account links to at
/// most one user.
#[derive(Debug, Clone, FromRow, Serialize)]
#[sqlx(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub struct AuthProvider {
    pub id: DbId,
    pub user_id: DbId,
    pub provider: String,
    pub provider_id: String,
    /// Raw profile payload returned by the provider, if any.
    pub provider_data: Option<Json<serde_json::Value>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for linking a provider account to a user being created.
#[derive(Debug, Clone)]
pub struct CreateAuthProvider {
    pub provider: String,
    pub provider_id: String,
    pub provider_data: Option<serde_json::Value>,
}
