//! Redis-backed access-token cache.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use uuid::Uuid;

use crate::{access_key, AccessTokenCache, CacheError, SessionDescriptor};

/// Production [`AccessTokenCache`] over a multiplexed Redis connection.
///
/// [`ConnectionManager`] reconnects transparently and is cheap to clone, so
/// one instance serves the whole process.
#[derive(Clone)]
pub struct RedisAccessCache {
    manager: ConnectionManager,
}

impl RedisAccessCache {
    /// Connect to Redis at `url` (e.g. `redis://127.0.0.1:6379/0`).
    pub async fn connect(url: &str) -> Result<Self, CacheError> {
        let client = redis::Client::open(url)?;
        let manager = client.get_connection_manager().await?;
        Ok(Self { manager })
    }
}

#[async_trait]
impl AccessTokenCache for RedisAccessCache {
    async fn put(
        &self,
        access_token_id: Uuid,
        descriptor: &SessionDescriptor,
        ttl_minutes: i64,
    ) -> Result<(), CacheError> {
        let payload = serde_json::to_string(descriptor)?;
        let ttl_secs = (ttl_minutes.max(0) as u64) * 60;

        let mut conn = self.manager.clone();
        let _: () = conn
            .set_ex(access_key(access_token_id), payload, ttl_secs)
            .await?;
        Ok(())
    }

    async fn get(&self, access_token_id: Uuid) -> Result<Option<SessionDescriptor>, CacheError> {
        let mut conn = self.manager.clone();
        let payload: Option<String> = conn.get(access_key(access_token_id)).await?;
        payload
            .map(|raw| serde_json::from_str(&raw))
            .transpose()
            .map_err(Into::into)
    }

    async fn delete(&self, access_token_id: Uuid) -> Result<(), CacheError> {
        let mut conn = self.manager.clone();
        let _: () = conn.del(access_key(access_token_id)).await?;
        Ok(())
    }

    async fn delete_many(&self, access_token_ids: &[Uuid]) -> Result<(), CacheError> {
        if access_token_ids.is_empty() {
            return Ok(());
        }

        let mut pipe = redis::pipe();
        for id in access_token_ids {
            pipe.del(access_key(*id)).ignore();
        }

        let mut conn = self.manager.clone();
        pipe.query_async::<()>(&mut conn).await?;
        Ok(())
    }
}
