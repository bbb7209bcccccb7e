use crate::types::DbId;

/// Domain-level error taxonomy.
///
/// Every variant maps to exactly one HTTP status code and a stable
/// machine-readable `error_code` at the API boundary (see the api crate's
/// `AppError`). Variants are raised at the point of detection and propagate
/// unmodified to the HTTP layer.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Wrong email/password combination at login (401).
    ///
    /// Deliberately generic: the caller cannot distinguish a wrong password
    /// from an unknown email through this variant alone.
    #[error("Bad auth data")]
    BadAuthData,

    /// Refresh presented with a mismatched device fingerprint (401).
    /// Raising this terminates the session.
    #[error("Bad fingerprint")]
    BadFingerprint,

    /// No auth session matches the given reference (404).
    #[error("Auth session not found")]
    AuthSessionNotFound,

    /// The referenced auth session was already terminated (409).
    #[error("Auth session deleted")]
    AuthSessionDeleted,

    #[error("User not found")]
    UserNotFound,

    #[error("User deleted")]
    UserDeleted,

    /// Email collision among non-deleted users (409).
    #[error("User with email {email} already exists, please use another email")]
    UserEmailAlreadyExists { email: String },

    #[error("Folder {folder_id} not found")]
    FolderNotFound { folder_id: DbId },

    #[error("Record {record_id} not found")]
    RecordNotFound { record_id: DbId },

    /// Invalid, expired, or missing bearer credentials (401, generic).
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Request-shape violation (422).
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
