use blob_listing::BlobStore;
use item_store::ItemStore;
use kv_cache::KvCache;
use std::sync::Arc;

use crate::cache_aside::CachedItems;
use crate::config::Config;

/// Backend handles shared by all route handlers
#[derive(Clone)]
pub struct AppState {
    /// Cache-aside view used for single-item reads and all item writes
    pub items: CachedItems,
    pub store: Arc<dyn ItemStore>,
    pub cache: Arc<dyn KvCache>,
    pub blobs: Arc<dyn BlobStore>,
    /// Reported by `/health`
    pub table_name: String,
    /// Bucket listed by `/api/files`
    pub data_bucket: String,
}

impl AppState {
    pub fn new(
        store: Arc<dyn ItemStore>,
        cache: Arc<dyn KvCache>,
        blobs: Arc<dyn BlobStore>,
        config: &Config,
    ) -> Self {
        Self {
            items: CachedItems::new(store.clone(), cache.clone()),
            store,
            cache,
            blobs,
            table_name: config.dynamodb_table.clone(),
            data_bucket: config.s3_bucket_data.clone(),
        }
    }
}
