//! Repository for the `auth_providers` table.

use passkeep_core::types::DbId;
use sqlx::SqlitePool;

use crate::models::auth_provider::AuthProvider;

/// Column list shared across queries to avoid repetition.
pub(crate) const COLUMNS: &str =
    "id, userId, provider, providerId, providerData, createdAt, updatedAt";

/// Lookups over linked provider accounts.
pub struct AuthProviderRepo;

impl AuthProviderRepo {
    /// Whether an account `(provider, provider_id)` is linked to any user.
    pub async fn exists(
        pool: &SqlitePool,
        provider: &str,
        provider_id: &str,
    ) -> Result<bool, sqlx::Error> {
        let found: i64 = sqlx::query_scalar(
            "SELECT EXISTS(
                SELECT 1 FROM auth_providers WHERE provider = ?1 AND providerId = ?2
             )",
        )
        .bind(provider)
        .bind(provider_id)
        .fetch_one(pool)
        .await?;
        Ok(found != 0)
    }

    /// Find the row for an external account.
    pub async fn find_by_provider(
        pool: &SqlitePool,
        provider: &str,
        provider_id: &str,
    ) -> Result<Option<AuthProvider>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM auth_providers WHERE provider = ?1 AND providerId = ?2"
        );
        sqlx::query_as::<_, AuthProvider>(&query)
            .bind(provider)
            .bind(provider_id)
            .fetch_optional(pool)
            .await
    }

    /// List every account linked to a user, oldest first.
    pub async fn list_for_user(
        pool: &SqlitePool,
        user_id: DbId,
    ) -> Result<Vec<AuthProvider>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM auth_providers WHERE userId = ?1 ORDER BY id ASC");
        sqlx::query_as::<_, AuthProvider>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
