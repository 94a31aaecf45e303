//! Repository for the `users` table.

use passkeep_core::types::DbId;
use sqlx::types::Json;
use sqlx::SqlitePool;

use crate::models::auth_provider::{AuthProvider, CreateAuthProvider};
use crate::models::user::{CreateUser, User};
use crate::repositories::auth_provider_repo::COLUMNS as PROVIDER_COLUMNS;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, uid, name, email, status, createdAt, updatedAt";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a user together with its first linked provider account.
    ///
    /// Both rows are written in one transaction; a unique violation on
    /// either leaves the database untouched.
    pub async fn create_with_provider(
        pool: &SqlitePool,
        user: &CreateUser,
        provider: &CreateAuthProvider,
    ) -> Result<(User, AuthProvider), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO users (uid, name, email, status)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING {COLUMNS}"
        );
        let created = sqlx::query_as::<_, User>(&query)
            .bind(&user.uid)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.status)
            .fetch_one(&mut *tx)
            .await?;

        let query = format!(
            "INSERT INTO auth_providers (userId, provider, providerId, providerData)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING {PROVIDER_COLUMNS}"
        );
        let linked = sqlx::query_as::<_, AuthProvider>(&query)
            .bind(created.id)
            .bind(&provider.provider)
            .bind(&provider.provider_id)
            .bind(provider.provider_data.as_ref().map(Json))
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok((created, linked))
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = ?1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by public UID.
    pub async fn find_by_uid(pool: &SqlitePool, uid: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE uid = ?1");
        sqlx::query_as::<_, User>(&query)
            .bind(uid)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email (case-sensitive).
    pub async fn find_by_email(
        pool: &SqlitePool,
        email: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = ?1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Delete a user; linked rows in every auth table cascade.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
