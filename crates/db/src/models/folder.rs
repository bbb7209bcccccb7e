//! Folder entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use lockstash_core::types::{DbId, Timestamp};

/// A folder row from the `folders` table. Folders form a tree per owner via
/// `parent_folder_id`; deleting a folder cascades to children and records.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Folder {
    pub id: DbId,
    #[serde(skip_serializing)]
    pub owner_user_id: DbId,
    pub parent_folder_id: Option<DbId>,
    pub name: String,
    pub created_at: Timestamp,
}

/// DTO for creating a new folder.
#[derive(Debug, Deserialize)]
pub struct CreateFolder {
    pub parent_folder_id: Option<DbId>,
    pub name: String,
}

/// DTO for updating a folder. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateFolder {
    pub parent_folder_id: Option<DbId>,
    pub name: Option<String>,
}
