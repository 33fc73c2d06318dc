//! Request and response bodies

use blob_listing::BlobEntry;
use chrono::{DateTime, Utc};
use item_store::{Item, ItemData};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct CreateItemRequest {
    /// Generated when absent or empty
    #[serde(default)]
    pub id: Option<String>,
    pub data: ItemData,
}

#[derive(Debug, Deserialize)]
pub struct UpdateItemRequest {
    pub timestamp: i64,
    pub data: ItemData,
}

#[derive(Debug, Deserialize)]
pub struct DeleteItemRequest {
    pub timestamp: i64,
}

#[derive(Debug, Deserialize)]
pub struct SetCacheRequest {
    pub key: String,
    #[serde(default)]
    pub value: Value,
    /// Seconds; 0 means no expiry
    #[serde(default)]
    pub ttl: u64,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ItemCreatedResponse {
    pub message: &'static str,
    pub item: Item,
}

#[derive(Debug, Serialize)]
pub struct ItemListResponse {
    pub count: usize,
    pub items: Vec<Item>,
}

#[derive(Debug, Serialize)]
pub struct CacheSetResponse {
    pub message: &'static str,
    pub key: String,
    pub ttl: u64,
}

#[derive(Debug, Serialize)]
pub struct CacheValueResponse {
    pub key: String,
    pub value: Value,
}

#[derive(Debug, Serialize)]
pub struct CacheDeleteResponse {
    pub message: &'static str,
    pub deleted: bool,
}

#[derive(Debug, Serialize)]
pub struct FileListResponse {
    pub bucket: String,
    pub count: usize,
    pub files: Vec<BlobEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceHealth {
    Healthy,
    Unhealthy,
}

#[derive(Debug, Serialize)]
pub struct HealthServices {
    pub redis: ServiceHealth,
    pub dynamodb: String,
    pub s3: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    pub services: HealthServices,
}
