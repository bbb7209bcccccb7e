//! Ephemeral access-token cache.
//!
//! Existence of an entry under `auth:access:{access_token_id}` is the sole
//! authority for "this access token is currently valid": entries expire by
//! TTL (natural access-token expiry) or are deleted explicitly (rotation,
//! logout, fingerprint mismatch, bulk revocation). The relational store
//! does not track access-token expiry at all.
//!
//! The store is abstracted behind [`AccessTokenCache`] so the hot path can
//! run against Redis in production and an in-memory map in tests and local
//! development.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use lockstash_core::types::DbId;

pub mod memory;
pub mod redis_store;

pub use memory::MemoryAccessCache;
pub use redis_store::RedisAccessCache;

/// Key prefix for access-token descriptors.
const ACCESS_KEY_PREFIX: &str = "auth:access";

/// Cache key for an access-token identifier.
pub fn access_key(access_token_id: Uuid) -> String {
    format!("{ACCESS_KEY_PREFIX}:{access_token_id}")
}

/// The small record cached under an access-token identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDescriptor {
    pub session_id: Uuid,
    pub user_id: DbId,
    /// Key for the owner's record content, derived from the stored password
    /// hash at login/refresh time.
    pub encryption_key: String,
}

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("cache backend error: {0}")]
    Backend(#[from] redis::RedisError),

    #[error("descriptor serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Ephemeral store mapping an access-token identifier to its session
/// descriptor.
#[async_trait]
pub trait AccessTokenCache: Send + Sync {
    /// Store `descriptor` under the token id, expiring after `ttl_minutes`.
    async fn put(
        &self,
        access_token_id: Uuid,
        descriptor: &SessionDescriptor,
        ttl_minutes: i64,
    ) -> Result<(), CacheError>;

    /// Look up a descriptor. `None` covers natural TTL expiry and explicit
    /// invalidation equally.
    async fn get(&self, access_token_id: Uuid) -> Result<Option<SessionDescriptor>, CacheError>;

    /// Explicitly invalidate one token (logout, rotation, mismatch).
    async fn delete(&self, access_token_id: Uuid) -> Result<(), CacheError>;

    /// Invalidate a batch of tokens in one round trip (bulk revocation).
    /// Best-effort atomic; entry TTLs are the backstop if the batch is
    /// interrupted.
    async fn delete_many(&self, access_token_ids: &[Uuid]) -> Result<(), CacheError>;
}
