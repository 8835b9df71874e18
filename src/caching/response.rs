// src/caching/response.rs
//
// Cached response entries. Every cached response is a pair of store
// entries: the body under the rendered key and the HTTP status code under
// the `_status_code` twin. The pair is written and removed together; a
// lone half is treated as a miss so an inconsistent pair is never served.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use super::key::STATUS_CODE_SUFFIX;
use super::store::CacheStore;
use crate::common::{CacheConfig, CacheError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedResponse {
    pub data: Value,
    pub status_code: u16,
}

pub struct ResponseCache {
    store: Arc<dyn CacheStore>,
    config: CacheConfig,
}

impl ResponseCache {
    pub fn new(store: Arc<dyn CacheStore>, config: CacheConfig) -> Self {
        Self { store, config }
    }

    /// Returns the cached pair, or `None` when either half is missing.
    pub async fn read(&self, key: &str) -> Result<Option<CachedResponse>, CacheError> {
        let Some(data) = self.store.get(key).await? else {
            return Ok(None);
        };
        let Some(status) = self.store.get(&status_key(key)).await? else {
            return Ok(None);
        };
        let Some(status_code) = status.as_u64().and_then(|code| u16::try_from(code).ok()) else {
            return Ok(None);
        };
        Ok(Some(CachedResponse { data, status_code }))
    }

    /// Writes both halves with the same TTL.
    pub async fn write(&self, key: &str, data: Value, status_code: u16) -> Result<(), CacheError> {
        self.store.set(key, data, self.config.ttl).await?;
        self.store
            .set(&status_key(key), Value::from(status_code), self.config.ttl)
            .await?;
        Ok(())
    }

    /// Removes both halves.
    pub async fn remove(&self, key: &str) -> Result<(), CacheError> {
        self.store.delete(key).await?;
        self.store.delete(&status_key(key)).await?;
        Ok(())
    }
}

fn status_key(key: &str) -> String {
    format!("{}{}", key, STATUS_CODE_SUFFIX)
}
