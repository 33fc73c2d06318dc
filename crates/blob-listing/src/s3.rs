//! S3 object listing

use crate::error::{BlobStoreError, Result};
use crate::store::{BlobEntry, BlobStore};
use async_trait::async_trait;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::types::Object;
use aws_sdk_s3::Client;
use chrono::{DateTime, Utc};
use tracing::debug;

pub struct S3BlobStore {
    client: Client,
}

impl S3BlobStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

fn to_entry(object: &Object) -> BlobEntry {
    BlobEntry {
        key: object.key().unwrap_or_default().to_string(),
        size: object.size().unwrap_or_default(),
        last_modified: object
            .last_modified()
            .and_then(|t| DateTime::<Utc>::from_timestamp(t.secs(), t.subsec_nanos())),
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn list_objects(&self, bucket: &str, max_keys: usize) -> Result<Vec<BlobEntry>> {
        let output = self
            .client
            .list_objects_v2()
            .bucket(bucket)
            .max_keys(i32::try_from(max_keys).unwrap_or(i32::MAX))
            .send()
            .await
            .map_err(|e| {
                BlobStoreError::Unavailable(format!(
                    "ListObjectsV2 on {} failed: {}",
                    bucket,
                    DisplayErrorContext(&e)
                ))
            })?;

        let entries: Vec<BlobEntry> = output
            .contents()
            .iter()
            .take(max_keys)
            .map(to_entry)
            .collect();
        debug!(bucket, count = entries.len(), "Listed objects");
        Ok(entries)
    }
}
