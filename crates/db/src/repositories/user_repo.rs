//! Repository for the `users` table.

use sqlx::PgExecutor;

use lockstash_core::types::DbId;

use crate::models::user::{CreateUser, UpdateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, password_hash, name, status, created_at, deleted_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(
        db: impl PgExecutor<'_>,
        input: &CreateUser,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (email, password_hash, name)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.name)
            .fetch_one(db)
            .await
    }

    /// Find a user by internal ID, deleted or not.
    pub async fn find_by_id(
        db: impl PgExecutor<'_>,
        id: DbId,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(db)
            .await
    }

    /// Find a non-deleted user by email (case-insensitive).
    pub async fn find_active_by_email(
        db: impl PgExecutor<'_>,
        email: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users
             WHERE LOWER(email) = LOWER($1) AND status = 'active'"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(db)
            .await
    }

    /// Whether a non-deleted user already holds this email.
    pub async fn email_exists(
        db: impl PgExecutor<'_>,
        email: &str,
    ) -> Result<bool, sqlx::Error> {
        let row: (bool,) = sqlx::query_as(
            "SELECT EXISTS (
                 SELECT 1 FROM users
                 WHERE LOWER(email) = LOWER($1) AND status = 'active'
             )",
        )
        .bind(email)
        .fetch_one(db)
        .await?;
        Ok(row.0)
    }

    /// Update a user's profile. Only non-`None` fields in `input` are
    /// applied. Returns `None` if no row with the given `id` exists.
    pub async fn update(
        db: impl PgExecutor<'_>,
        id: DbId,
        input: &UpdateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                email = COALESCE($2, email),
                name = COALESCE($3, name)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.email)
            .bind(&input.name)
            .fetch_optional(db)
            .await
    }

    /// Soft-delete a user. Returns `true` if the row transitioned.
    pub async fn soft_delete(db: impl PgExecutor<'_>, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET status = 'deleted', deleted_at = NOW()
             WHERE id = $1 AND status = 'active'",
        )
        .bind(id)
        .execute(db)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
