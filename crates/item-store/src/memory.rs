//! In-process item store

use crate::clock::VersionClock;
use crate::error::Result;
use crate::store::ItemStore;
use crate::types::{rfc3339, Item, ItemData, NewItem};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

/// Item store held in memory, ordered by `(id, timestamp)`.
///
/// Follows the same semantics as [`DynamoItemStore`](crate::DynamoItemStore),
/// including upsert-on-update.
#[derive(Debug, Default)]
pub struct MemoryItemStore {
    items: RwLock<BTreeMap<(String, i64), Item>>,
    clock: VersionClock,
}

impl MemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored versions across all ids
    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }
}

#[async_trait]
impl ItemStore for MemoryItemStore {
    async fn write(&self, item: NewItem) -> Result<Item> {
        let item = item.stamp(self.clock.next());
        self.items
            .write()
            .await
            .insert((item.id.clone(), item.timestamp), item.clone());
        Ok(item)
    }

    async fn find_latest(&self, id: &str) -> Result<Option<Item>> {
        let items = self.items.read().await;
        let range = (id.to_string(), i64::MIN)..=(id.to_string(), i64::MAX);
        Ok(items.range(range).next_back().map(|(_, item)| item.clone()))
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<Item>> {
        Ok(self
            .items
            .read()
            .await
            .values()
            .take(limit)
            .cloned()
            .collect())
    }

    async fn update(&self, id: &str, timestamp: i64, data: ItemData) -> Result<()> {
        let updated_at = rfc3339(Utc::now());
        let mut items = self.items.write().await;
        let item = items
            .entry((id.to_string(), timestamp))
            .or_insert_with(|| Item {
                id: id.to_string(),
                timestamp,
                data: ItemData::new(),
                created_at: String::new(),
                updated_at: None,
            });
        item.data = data;
        item.updated_at = Some(updated_at);
        Ok(())
    }

    async fn delete(&self, id: &str, timestamp: i64) -> Result<()> {
        self.items
            .write()
            .await
            .remove(&(id.to_string(), timestamp));
        Ok(())
    }
}
