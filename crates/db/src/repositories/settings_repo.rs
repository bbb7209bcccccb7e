//! Repository for the `user_settings` table.

use sqlx::PgExecutor;

use lockstash_core::types::DbId;

use crate::models::settings::Settings;

/// Provides operations for per-user settings.
pub struct SettingsRepo;

impl SettingsRepo {
    /// Insert the default settings row for a freshly created user.
    pub async fn create_default(
        db: impl PgExecutor<'_>,
        user_id: DbId,
    ) -> Result<Settings, sqlx::Error> {
        sqlx::query_as::<_, Settings>(
            "INSERT INTO user_settings (user_id)
             VALUES ($1)
             RETURNING user_id, auth_session_expiration",
        )
        .bind(user_id)
        .fetch_one(db)
        .await
    }

    /// Fetch a user's settings.
    pub async fn get(
        db: impl PgExecutor<'_>,
        user_id: DbId,
    ) -> Result<Option<Settings>, sqlx::Error> {
        sqlx::query_as::<_, Settings>(
            "SELECT user_id, auth_session_expiration FROM user_settings WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(db)
        .await
    }

    /// Update the session expiration window. Returns the updated row, or
    /// `None` if the user has no settings row.
    pub async fn update(
        db: impl PgExecutor<'_>,
        user_id: DbId,
        auth_session_expiration: i32,
    ) -> Result<Option<Settings>, sqlx::Error> {
        sqlx::query_as::<_, Settings>(
            "UPDATE user_settings SET auth_session_expiration = $2
             WHERE user_id = $1
             RETURNING user_id, auth_session_expiration",
        )
        .bind(user_id)
        .bind(auth_session_expiration)
        .fetch_optional(db)
        .await
    }

    /// Remove a user's settings row (user deletion).
    pub async fn delete(db: impl PgExecutor<'_>, user_id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM user_settings WHERE user_id = $1")
            .bind(user_id)
            .execute(db)
            .await?;
        Ok(())
    }
}
