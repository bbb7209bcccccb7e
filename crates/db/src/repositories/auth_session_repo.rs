//! Repository for the `auth_sessions` table.
//!
//! Rows are never physically deleted: termination clears the token columns
//! and flips `status` to `deleted`, preserving the row for audit. The
//! queries here never resurrect a terminated session -- rotation and
//! termination UPDATEs are guarded on `status = 'active'`.

use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use lockstash_core::types::DbId;

use crate::models::auth_session::{AuthSession, CreateAuthSession};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, user_ip, user_agent, fingerprint, access_token, \
                        refresh_token, expires_in, last_online, status, created_at, deleted_at";

/// Provides persistence operations for auth sessions.
pub struct AuthSessionRepo;

impl AuthSessionRepo {
    /// Insert a new active session with freshly generated session, access,
    /// and refresh token identifiers. Returns the created row.
    pub async fn create(
        db: impl PgExecutor<'_>,
        input: &CreateAuthSession,
    ) -> Result<AuthSession, sqlx::Error> {
        let query = format!(
            "INSERT INTO auth_sessions
                 (id, user_id, user_ip, user_agent, fingerprint,
                  access_token, refresh_token, expires_in)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AuthSession>(&query)
            .bind(Uuid::new_v4())
            .bind(input.user_id)
            .bind(&input.user_ip)
            .bind(&input.user_agent)
            .bind(&input.fingerprint)
            .bind(Uuid::new_v4())
            .bind(Uuid::new_v4())
            .bind(input.expires_in)
            .fetch_one(db)
            .await
    }

    /// Find a session by primary key, regardless of status.
    pub async fn find_by_id(
        db: impl PgExecutor<'_>,
        id: Uuid,
    ) -> Result<Option<AuthSession>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM auth_sessions WHERE id = $1");
        sqlx::query_as::<_, AuthSession>(&query)
            .bind(id)
            .fetch_optional(db)
            .await
    }

    /// Find a session by its current refresh token identifier, regardless of
    /// status. The caller distinguishes "not found" (rotated-away or never
    /// existed) from "terminated" for the 404/409 split.
    pub async fn find_by_refresh_token(
        db: impl PgExecutor<'_>,
        refresh_token: Uuid,
    ) -> Result<Option<AuthSession>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM auth_sessions WHERE refresh_token = $1");
        sqlx::query_as::<_, AuthSession>(&query)
            .bind(refresh_token)
            .fetch_optional(db)
            .await
    }

    /// All active sessions for a user (bulk-revocation sweep input).
    pub async fn find_active_for_user(
        db: impl PgExecutor<'_>,
        user_id: DbId,
    ) -> Result<Vec<AuthSession>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM auth_sessions
             WHERE user_id = $1 AND status = 'active'"
        );
        sqlx::query_as::<_, AuthSession>(&query)
            .bind(user_id)
            .fetch_all(db)
            .await
    }

    /// Page of active sessions for a user, oldest first.
    pub async fn list_active_for_user(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<AuthSession>, i64), sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM auth_sessions
             WHERE user_id = $1 AND status = 'active'
             ORDER BY created_at
             LIMIT $2 OFFSET $3"
        );
        let sessions = sqlx::query_as::<_, AuthSession>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;

        let total: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM auth_sessions WHERE user_id = $1 AND status = 'active'",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await?;

        Ok((sessions, total.0))
    }

    /// Rotate both token identifiers on a successful refresh, updating the
    /// connection metadata and `last_online`. Returns the updated row, or
    /// `None` if the session is no longer active.
    pub async fn rotate_tokens(
        db: impl PgExecutor<'_>,
        id: Uuid,
        access_token: Uuid,
        refresh_token: Uuid,
        user_ip: &str,
        user_agent: Option<&str>,
    ) -> Result<Option<AuthSession>, sqlx::Error> {
        let query = format!(
            "UPDATE auth_sessions SET
                access_token = $2,
                refresh_token = $3,
                user_ip = $4,
                user_agent = $5,
                last_online = NOW()
             WHERE id = $1 AND status = 'active'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AuthSession>(&query)
            .bind(id)
            .bind(access_token)
            .bind(refresh_token)
            .bind(user_ip)
            .bind(user_agent)
            .fetch_optional(db)
            .await
    }

    /// Terminate a session after a fingerprint mismatch on refresh.
    ///
    /// The access token is cleared but the refresh token column is left in
    /// place: a later replay of the same refresh token must find the row and
    /// surface "session deleted" rather than "not found".
    pub async fn terminate_on_mismatch(
        db: impl PgExecutor<'_>,
        id: Uuid,
        user_ip: &str,
        user_agent: Option<&str>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE auth_sessions SET
                access_token = NULL,
                user_ip = $2,
                user_agent = $3,
                last_online = NOW(),
                status = 'deleted',
                deleted_at = NOW()
             WHERE id = $1 AND status = 'active'",
        )
        .bind(id)
        .bind(user_ip)
        .bind(user_agent)
        .execute(db)
        .await?;
        Ok(())
    }

    /// Terminate a session on logout or targeted revocation, clearing both
    /// token columns. Connection metadata is updated only when supplied
    /// (targeted revocation of another session carries none).
    pub async fn terminate(
        db: impl PgExecutor<'_>,
        id: Uuid,
        user_ip: Option<&str>,
        user_agent: Option<&str>,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE auth_sessions SET
                access_token = NULL,
                refresh_token = NULL,
                user_ip = COALESCE($2, user_ip),
                user_agent = COALESCE($3, user_agent),
                last_online = NOW(),
                status = 'deleted',
                deleted_at = NOW()
             WHERE id = $1 AND status = 'active'",
        )
        .bind(id)
        .bind(user_ip)
        .bind(user_agent)
        .execute(db)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Terminate every active session of a user in one statement. Returns
    /// the number of terminated rows.
    pub async fn terminate_all_for_user(
        db: impl PgExecutor<'_>,
        user_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE auth_sessions SET
                access_token = NULL,
                refresh_token = NULL,
                status = 'deleted',
                deleted_at = NOW()
             WHERE user_id = $1 AND status = 'active'",
        )
        .bind(user_id)
        .execute(db)
        .await?;
        Ok(result.rows_affected())
    }
}
