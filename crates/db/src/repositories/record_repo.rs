//! Repository for the `records` table.
//!
//! `content` passing through this module is always ciphertext; encryption
//! and decryption happen in the API layer where the per-session key lives.

use sqlx::{PgExecutor, PgPool};

use lockstash_core::types::DbId;

use crate::models::record::{CreateRecord, Record, RecordFilter, UpdateRecord};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, owner_user_id, folder_id, record_type, title, content, \
                        is_favorite, created_at, updated_at";

/// Provides CRUD operations for secret records.
pub struct RecordRepo;

impl RecordRepo {
    /// Insert a new record, returning the created row. `content` must
    /// already be ciphertext.
    pub async fn create(
        db: impl PgExecutor<'_>,
        owner_user_id: DbId,
        input: &CreateRecord,
        content_ciphertext: &str,
    ) -> Result<Record, sqlx::Error> {
        let query = format!(
            "INSERT INTO records
                 (owner_user_id, folder_id, record_type, title, content, is_favorite)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Record>(&query)
            .bind(owner_user_id)
            .bind(input.folder_id)
            .bind(input.record_type)
            .bind(&input.title)
            .bind(content_ciphertext)
            .bind(input.is_favorite)
            .fetch_one(db)
            .await
    }

    /// Find a record by id, scoped to its owner.
    pub async fn find_for_owner(
        db: impl PgExecutor<'_>,
        id: DbId,
        owner_user_id: DbId,
    ) -> Result<Option<Record>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM records WHERE id = $1 AND owner_user_id = $2");
        sqlx::query_as::<_, Record>(&query)
            .bind(id)
            .bind(owner_user_id)
            .fetch_optional(db)
            .await
    }

    /// Page of a user's records with optional filters, oldest first, plus
    /// the total matching count. Null filter binds are no-ops.
    pub async fn list_for_owner(
        pool: &PgPool,
        owner_user_id: DbId,
        filter: &RecordFilter,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Record>, i64), sqlx::Error> {
        const MATCH: &str = "owner_user_id = $1
               AND ($2::BIGINT IS NULL OR folder_id = $2)
               AND ($3::record_type IS NULL OR record_type = $3)
               AND ($4::BOOLEAN IS NULL OR is_favorite = $4)";

        let query = format!(
            "SELECT {COLUMNS} FROM records
             WHERE {MATCH}
             ORDER BY id
             LIMIT $5 OFFSET $6"
        );
        let records = sqlx::query_as::<_, Record>(&query)
            .bind(owner_user_id)
            .bind(filter.folder_id)
            .bind(filter.record_type)
            .bind(filter.is_favorite)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;

        let count_query = format!("SELECT COUNT(*) FROM records WHERE {MATCH}");
        let total: (i64,) = sqlx::query_as(&count_query)
            .bind(owner_user_id)
            .bind(filter.folder_id)
            .bind(filter.record_type)
            .bind(filter.is_favorite)
            .fetch_one(pool)
            .await?;

        Ok((records, total.0))
    }

    /// Update a record. Only non-`None` fields in `input` are applied;
    /// `content_ciphertext` replaces the stored ciphertext when present.
    /// Returns `None` if the record does not exist for this owner.
    pub async fn update(
        db: impl PgExecutor<'_>,
        id: DbId,
        owner_user_id: DbId,
        input: &UpdateRecord,
        content_ciphertext: Option<&str>,
    ) -> Result<Option<Record>, sqlx::Error> {
        let query = format!(
            "UPDATE records SET
                folder_id = COALESCE($3, folder_id),
                record_type = COALESCE($4, record_type),
                title = COALESCE($5, title),
                content = COALESCE($6, content),
                is_favorite = COALESCE($7, is_favorite),
                updated_at = NOW()
             WHERE id = $1 AND owner_user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Record>(&query)
            .bind(id)
            .bind(owner_user_id)
            .bind(input.folder_id)
            .bind(input.record_type)
            .bind(&input.title)
            .bind(content_ciphertext)
            .bind(input.is_favorite)
            .fetch_optional(db)
            .await
    }

    /// Delete a record. Returns `true` if a row was deleted.
    pub async fn delete(
        db: impl PgExecutor<'_>,
        id: DbId,
        owner_user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM records WHERE id = $1 AND owner_user_id = $2")
            .bind(id)
            .bind(owner_user_id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
