//! User entity model and DTOs.

use passkeep_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full user row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[sqlx(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: DbId,
    /// Public identifier handed to clients instead of the row id.
    pub uid: String,
    pub name: String,
    pub email: Option<String>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new user.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub uid: String,
    pub name: String,
    pub email: Option<String>,
    pub status: String,
}
