//! In-memory access-token cache.
//!
//! Backs integration tests and local development where no Redis server is
//! available. Semantics mirror the Redis implementation: entries expire at
//! their deadline and expired entries are indistinguishable from deleted
//! ones.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use uuid::Uuid;

use crate::{AccessTokenCache, CacheError, SessionDescriptor};

#[derive(Default)]
pub struct MemoryAccessCache {
    entries: Mutex<HashMap<Uuid, (SessionDescriptor, Instant)>>,
}

impl MemoryAccessCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&self, access_token_id: Uuid, descriptor: SessionDescriptor, ttl: Duration) {
        let deadline = Instant::now() + ttl;
        self.entries
            .lock()
            .expect("cache mutex poisoned")
            .insert(access_token_id, (descriptor, deadline));
    }
}

#[async_trait]
impl AccessTokenCache for MemoryAccessCache {
    async fn put(
        &self,
        access_token_id: Uuid,
        descriptor: &SessionDescriptor,
        ttl_minutes: i64,
    ) -> Result<(), CacheError> {
        let ttl = Duration::from_secs((ttl_minutes.max(0) as u64) * 60);
        self.insert(access_token_id, descriptor.clone(), ttl);
        Ok(())
    }

    async fn get(&self, access_token_id: Uuid) -> Result<Option<SessionDescriptor>, CacheError> {
        let mut entries = self.entries.lock().expect("cache mutex poisoned");
        match entries.get(&access_token_id) {
            Some((descriptor, deadline)) if *deadline > Instant::now() => {
                Ok(Some(descriptor.clone()))
            }
            Some(_) => {
                // Lazily drop expired entries on read, like Redis would.
                entries.remove(&access_token_id);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, access_token_id: Uuid) -> Result<(), CacheError> {
        self.entries
            .lock()
            .expect("cache mutex poisoned")
            .remove(&access_token_id);
        Ok(())
    }

    async fn delete_many(&self, access_token_ids: &[Uuid]) -> Result<(), CacheError> {
        let mut entries = self.entries.lock().expect("cache mutex poisoned");
        for id in access_token_ids {
            entries.remove(id);
        }
        Ok(())
    }
}
