//! Per-user settings model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use lockstash_core::types::DbId;

/// Default session liveness window in minutes (30 days).
pub const DEFAULT_SESSION_EXPIRATION_MINS: i32 = 43_800;

/// Settings row from the `user_settings` table (one per user).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Settings {
    #[serde(skip_serializing)]
    pub user_id: DbId,
    /// Auth session (refresh token) expiration in minutes. Applied to
    /// sessions created after the change; running sessions keep the window
    /// they were created with.
    pub auth_session_expiration: i32,
}

/// DTO for patching settings. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateSettings {
    pub auth_session_expiration: Option<i32>,
}
