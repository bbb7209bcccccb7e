use std::sync::Arc;

use lockstash_cache::AccessTokenCache;
use lockstash_core::crypto::Encryptor;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already
/// `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: lockstash_db::DbPool,
    /// Ephemeral access-token cache (Redis in production, in-memory in
    /// tests).
    pub cache: Arc<dyn AccessTokenCache>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Record-content encryptor bound to the process secret.
    pub encryptor: Arc<Encryptor>,
}
