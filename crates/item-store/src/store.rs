use crate::error::Result;
use crate::types::{Item, ItemData, NewItem};
use async_trait::async_trait;

/// Default cap for [`ItemStore::list_recent`]
pub const DEFAULT_LIST_LIMIT: usize = 20;

/// Storage for timestamped item versions
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Stamp `item` with a fresh timestamp and `createdAt`, then persist it
    async fn write(&self, item: NewItem) -> Result<Item>;

    /// The version of `id` with the greatest timestamp, if any
    async fn find_latest(&self, id: &str) -> Result<Option<Item>>;

    /// Up to `limit` items across all ids, in backend order
    async fn list_recent(&self, limit: usize) -> Result<Vec<Item>>;

    /// Replace `data` on the exact `(id, timestamp)` version and set
    /// `updatedAt`. The key is not checked for existence first, so updating
    /// a missing version creates it.
    async fn update(&self, id: &str, timestamp: i64, data: ItemData) -> Result<()>;

    /// Remove the exact `(id, timestamp)` version. Missing keys are not an error.
    async fn delete(&self, id: &str, timestamp: i64) -> Result<()>;
}
