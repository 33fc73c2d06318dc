//! Cache-aside access to items
//!
//! Single-item reads go through the cache first and fall back to the item
//! store; writes go to the store and then drop the cached copy. The store is
//! always authoritative: a cache that is down, empty or holding garbage
//! only costs a store round-trip.

use item_store::{Item, ItemData, ItemStore, ItemStoreError, NewItem};
use kv_cache::{CacheError, KvCache, Ttl};
use serde::Serialize;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// How long a read-through copy stays cached
pub const ITEM_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// Longest a single cache call may take before it counts as a failure
pub const CACHE_CALL_TIMEOUT: Duration = Duration::from_secs(2);

/// Cache key holding the latest version of `id`
pub fn item_cache_key(id: &str) -> String {
    format!("item:{}", id)
}

/// Where a returned item came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Cache,
    Database,
}

/// Result of a single-item read, serialized as `{source, item}`
#[derive(Debug, Clone, Serialize)]
pub struct ItemLookup {
    pub source: Source,
    pub item: Item,
}

/// A store write that succeeded or failed, followed by cache invalidation
#[derive(Debug)]
pub enum WriteError {
    Store(ItemStoreError),
    /// The store write went through but the cached copy could not be dropped
    Invalidate(CacheError),
}

impl fmt::Display for WriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteError::Store(e) => write!(f, "{}", e),
            WriteError::Invalidate(e) => write!(f, "cache invalidation failed: {}", e),
        }
    }
}

impl std::error::Error for WriteError {}

/// Item store fronted by a read-through cache
#[derive(Clone)]
pub struct CachedItems {
    store: Arc<dyn ItemStore>,
    cache: Arc<dyn KvCache>,
    ttl: Duration,
    call_timeout: Duration,
}

impl CachedItems {
    pub fn new(store: Arc<dyn ItemStore>, cache: Arc<dyn KvCache>) -> Self {
        Self {
            store,
            cache,
            ttl: ITEM_CACHE_TTL,
            call_timeout: CACHE_CALL_TIMEOUT,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_call_timeout(mut self, call_timeout: Duration) -> Self {
        self.call_timeout = call_timeout;
        self
    }

    /// Run one cache call, turning a stalled backend into `Unavailable`
    async fn bounded<T, F>(&self, operation: &str, call: F) -> Result<T, CacheError>
    where
        F: Future<Output = Result<T, CacheError>>,
    {
        tokio::time::timeout(self.call_timeout, call)
            .await
            .unwrap_or_else(|_| {
                Err(CacheError::Unavailable(format!(
                    "{} timed out after {:?}",
                    operation, self.call_timeout
                )))
            })
    }

    /// Latest version of `id`, from cache when possible
    pub async fn get(&self, id: &str) -> Result<Option<ItemLookup>, ItemStoreError> {
        let key = item_cache_key(id);

        match self.bounded("GET", self.cache.get(&key)).await {
            Ok(Some(cached)) => match serde_json::from_str::<Item>(&cached) {
                Ok(item) => {
                    debug!(id, "Item served from cache");
                    return Ok(Some(ItemLookup {
                        source: Source::Cache,
                        item,
                    }));
                }
                Err(e) => warn!(key = %key, error = %e, "Ignoring undecodable cache entry"),
            },
            Ok(None) => {}
            Err(e) => warn!(key = %key, error = %e, "Cache read failed, using item store"),
        }

        let Some(item) = self.store.find_latest(id).await? else {
            return Ok(None);
        };

        match serde_json::to_string(&item) {
            Ok(json) => {
                if let Err(e) = self
                    .bounded("SET", self.cache.set(&key, json, Ttl::Expires(self.ttl)))
                    .await
                {
                    warn!(key = %key, error = %e, "Failed to cache item");
                }
            }
            Err(e) => warn!(key = %key, error = %e, "Failed to encode item for cache"),
        }

        Ok(Some(ItemLookup {
            source: Source::Database,
            item,
        }))
    }

    /// Store a new version. The cached copy of the id is dropped
    /// best-effort, since it now describes an older version.
    pub async fn create(&self, item: NewItem) -> Result<Item, ItemStoreError> {
        let item = self.store.write(item).await?;
        if let Err(e) = self.invalidate(&item.id).await {
            warn!(id = %item.id, error = %e, "Failed to invalidate cached item after create");
        }
        Ok(item)
    }

    /// Replace `data` on `(id, timestamp)`, then invalidate the cached copy
    pub async fn update(&self, id: &str, timestamp: i64, data: ItemData) -> Result<(), WriteError> {
        self.store
            .update(id, timestamp, data)
            .await
            .map_err(WriteError::Store)?;
        self.invalidate(id).await.map_err(WriteError::Invalidate)
    }

    /// Delete `(id, timestamp)`, then invalidate the cached copy
    pub async fn delete(&self, id: &str, timestamp: i64) -> Result<(), WriteError> {
        self.store
            .delete(id, timestamp)
            .await
            .map_err(WriteError::Store)?;
        self.invalidate(id).await.map_err(WriteError::Invalidate)
    }

    async fn invalidate(&self, id: &str) -> Result<(), CacheError> {
        let key = item_cache_key(id);
        let removed = self.bounded("DEL", self.cache.delete(&key)).await?;
        debug!(id, removed, "Invalidated cached item");
        Ok(())
    }
}
