//! In-process bucket listings

use crate::error::Result;
use crate::store::{BlobEntry, BlobStore};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Listings held in memory, returned in insertion order
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    buckets: RwLock<HashMap<String, Vec<BlobEntry>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object to `bucket`'s listing
    pub async fn insert(&self, bucket: &str, entry: BlobEntry) {
        self.buckets
            .write()
            .await
            .entry(bucket.to_string())
            .or_default()
            .push(entry);
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn list_objects(&self, bucket: &str, max_keys: usize) -> Result<Vec<BlobEntry>> {
        Ok(self
            .buckets
            .read()
            .await
            .get(bucket)
            .map(|entries| entries.iter().take(max_keys).cloned().collect())
            .unwrap_or_default())
    }
}
