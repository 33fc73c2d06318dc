use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Default cap for [`BlobStore::list_objects`]
pub const DEFAULT_MAX_KEYS: usize = 100;

/// One object in a bucket listing
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlobEntry {
    pub key: String,
    pub size: i64,
    pub last_modified: Option<DateTime<Utc>>,
}

#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Up to `max_keys` objects from `bucket`, in the order the backend returns them
    async fn list_objects(&self, bucket: &str, max_keys: usize) -> Result<Vec<BlobEntry>>;
}
