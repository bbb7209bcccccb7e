//! Auth session model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use lockstash_core::types::{DbId, Timestamp};

/// Lifecycle state of an auth session.
///
/// The transition `Active -> Deleted` is one-directional and permanent: a
/// terminated session must never again produce a valid access or refresh
/// token. Rows are soft-deleted only, preserving audit history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "session_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Active,
    Deleted,
}

/// An auth session row from the `auth_sessions` table.
///
/// `access_token` / `refresh_token` hold the opaque 128-bit identifiers the
/// signed bearer tokens refer to. `refresh_token` rotates on every
/// successful refresh; `access_token` validity is tracked by the access
/// cache, not here. `fingerprint` is the salted hash of the client device
/// fingerprint and is immutable for the life of the session.
#[derive(Debug, Clone, FromRow)]
pub struct AuthSession {
    pub id: Uuid,
    pub user_id: DbId,
    pub user_ip: String,
    pub user_agent: Option<String>,
    pub fingerprint: String,
    pub access_token: Option<Uuid>,
    pub refresh_token: Option<Uuid>,
    /// Refresh-token (session liveness) window in minutes, copied from the
    /// user's settings at creation time.
    pub expires_in: i32,
    pub last_online: Timestamp,
    pub status: SessionStatus,
    pub created_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// Public view of a session for the session-management endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct AuthSessionResponse {
    pub id: Uuid,
    pub user_ip: String,
    pub user_agent: Option<String>,
    pub last_online: Timestamp,
    pub created_at: Timestamp,
}

impl From<AuthSession> for AuthSessionResponse {
    fn from(session: AuthSession) -> Self {
        Self {
            id: session.id,
            user_ip: session.user_ip,
            user_agent: session.user_agent,
            last_online: session.last_online,
            created_at: session.created_at,
        }
    }
}

/// DTO for creating a new session at login. Fresh token identifiers are
/// generated by the repository.
pub struct CreateAuthSession {
    pub user_id: DbId,
    pub user_ip: String,
    pub user_agent: Option<String>,
    /// Already salted-hashed fingerprint.
    pub fingerprint: String,
    pub expires_in: i32,
}
