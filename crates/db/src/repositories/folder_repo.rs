//! Repository for the `folders` table.
//!
//! All lookups are owner-scoped: a folder id belonging to another user is
//! indistinguishable from a missing one.

use sqlx::{PgExecutor, PgPool};

use lockstash_core::types::DbId;

use crate::models::folder::{CreateFolder, Folder, UpdateFolder};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, owner_user_id, parent_folder_id, name, created_at";

/// Provides CRUD operations for folders.
pub struct FolderRepo;

impl FolderRepo {
    /// Insert a new folder, returning the created row.
    pub async fn create(
        db: impl PgExecutor<'_>,
        owner_user_id: DbId,
        input: &CreateFolder,
    ) -> Result<Folder, sqlx::Error> {
        let query = format!(
            "INSERT INTO folders (owner_user_id, parent_folder_id, name)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Folder>(&query)
            .bind(owner_user_id)
            .bind(input.parent_folder_id)
            .bind(&input.name)
            .fetch_one(db)
            .await
    }

    /// Find a folder by id, scoped to its owner.
    pub async fn find_for_owner(
        db: impl PgExecutor<'_>,
        id: DbId,
        owner_user_id: DbId,
    ) -> Result<Option<Folder>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM folders WHERE id = $1 AND owner_user_id = $2");
        sqlx::query_as::<_, Folder>(&query)
            .bind(id)
            .bind(owner_user_id)
            .fetch_optional(db)
            .await
    }

    /// Page of a user's folders, oldest first, with the total count.
    pub async fn list_for_owner(
        pool: &PgPool,
        owner_user_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Folder>, i64), sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM folders
             WHERE owner_user_id = $1
             ORDER BY id
             LIMIT $2 OFFSET $3"
        );
        let folders = sqlx::query_as::<_, Folder>(&query)
            .bind(owner_user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;

        let total: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM folders WHERE owner_user_id = $1")
                .bind(owner_user_id)
                .fetch_one(pool)
                .await?;

        Ok((folders, total.0))
    }

    /// Update a folder. Only non-`None` fields in `input` are applied.
    /// Returns `None` if the folder does not exist for this owner.
    pub async fn update(
        db: impl PgExecutor<'_>,
        id: DbId,
        owner_user_id: DbId,
        input: &UpdateFolder,
    ) -> Result<Option<Folder>, sqlx::Error> {
        let query = format!(
            "UPDATE folders SET
                parent_folder_id = COALESCE($3, parent_folder_id),
                name = COALESCE($4, name)
             WHERE id = $1 AND owner_user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Folder>(&query)
            .bind(id)
            .bind(owner_user_id)
            .bind(input.parent_folder_id)
            .bind(&input.name)
            .fetch_optional(db)
            .await
    }

    /// Delete a folder. Children and contained records go with it via
    /// `ON DELETE CASCADE`. Returns `true` if a row was deleted.
    pub async fn delete(
        db: impl PgExecutor<'_>,
        id: DbId,
        owner_user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM folders WHERE id = $1 AND owner_user_id = $2")
            .bind(id)
            .bind(owner_user_id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every folder a user owns (user deletion).
    pub async fn delete_all_for_owner(
        db: impl PgExecutor<'_>,
        owner_user_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM folders WHERE owner_user_id = $1")
            .bind(owner_user_id)
            .execute(db)
            .await?;
        Ok(result.rows_affected())
    }
}
