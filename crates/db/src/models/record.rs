//! Secret record model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use lockstash_core::types::{DbId, Timestamp};

/// Kind of secret stored in a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "record_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RecordType {
    Note,
    Login,
    Card,
}

/// A record row from the `records` table.
///
/// `content` is ciphertext produced with the owner's per-session derived
/// key; the database never sees plaintext.
#[derive(Debug, Clone, FromRow)]
pub struct Record {
    pub id: DbId,
    pub owner_user_id: DbId,
    pub folder_id: Option<DbId>,
    pub record_type: RecordType,
    pub title: String,
    pub content: String,
    pub is_favorite: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// API view of a record. `content` is `None` in listings (decryption is
/// per-item on demand) and plaintext in single-record reads.
#[derive(Debug, Clone, Serialize)]
pub struct RecordResponse {
    pub id: DbId,
    pub folder_id: Option<DbId>,
    pub record_type: RecordType,
    pub title: String,
    pub content: Option<String>,
    pub is_favorite: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl RecordResponse {
    /// Build a response from a row, substituting `content` (already
    /// decrypted plaintext, or `None` for listings).
    pub fn from_row(record: Record, content: Option<String>) -> Self {
        Self {
            id: record.id,
            folder_id: record.folder_id,
            record_type: record.record_type,
            title: record.title,
            content,
            is_favorite: record.is_favorite,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// DTO for creating a record. `content` here is plaintext; the handler
/// encrypts before it reaches the repository.
#[derive(Debug, Deserialize)]
pub struct CreateRecord {
    pub folder_id: Option<DbId>,
    pub record_type: RecordType,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub is_favorite: bool,
}

/// DTO for updating a record. All fields are optional; `content` is
/// plaintext and re-encrypted by the handler when present.
#[derive(Debug, Deserialize)]
pub struct UpdateRecord {
    pub folder_id: Option<DbId>,
    pub record_type: Option<RecordType>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub is_favorite: Option<bool>,
}

/// Listing filters for `GET /records`.
#[derive(Debug, Default, Deserialize)]
pub struct RecordFilter {
    pub folder_id: Option<DbId>,
    pub record_type: Option<RecordType>,
    pub is_favorite: Option<bool>,
}
