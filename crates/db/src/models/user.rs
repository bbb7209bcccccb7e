//! User entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use lockstash_core::types::{DbId, Timestamp};

/// Soft-delete state of a user row.
///
/// The state is explicit rather than inferred from `deleted_at`; the
/// timestamp is kept purely as an audit field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Deleted,
}

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub status: UserStatus,
    pub created_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub email: String,
    pub name: String,
    pub created_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            created_at: user.created_at,
        }
    }
}

/// DTO for creating a new user. The password is hashed before this struct
/// is built.
pub struct CreateUser {
    pub email: String,
    pub password_hash: String,
    pub name: String,
}

/// DTO for updating a user's profile. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateUser {
    pub email: Option<String>,
    pub name: Option<String>,
}
