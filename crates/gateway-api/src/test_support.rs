//! Router harness and failing backends shared by handler tests

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use blob_listing::{BlobEntry, BlobStore, BlobStoreError, MemoryBlobStore};
use item_store::{Item, ItemData, ItemStore, ItemStoreError, MemoryItemStore, NewItem};
use kv_cache::{CacheError, KvCache, MemoryCache, Ttl};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

use crate::config::Config;
use crate::server::create_router;
use crate::state::AppState;

/// Cache-call bound used by routers under test
pub const TEST_CACHE_CALL_TIMEOUT: Duration = Duration::from_millis(200);

pub fn test_config() -> Config {
    Config {
        dynamodb_table: "items-test".to_string(),
        s3_bucket_data: "data-test".to_string(),
        s3_bucket_static: "static-test".to_string(),
        ..Config::default()
    }
}

/// Router wired to in-memory backends, with handles for seeding and inspection.
///
/// `with_*` swaps the backend the router sees; the memory handles keep
/// pointing at the originals.
pub struct Harness {
    pub router: Router,
    pub store: Arc<MemoryItemStore>,
    pub cache: Arc<MemoryCache>,
    pub blobs: Arc<MemoryBlobStore>,
    active_store: Arc<dyn ItemStore>,
    active_cache: Arc<dyn KvCache>,
    active_blobs: Arc<dyn BlobStore>,
    request_timeout: Duration,
}

impl Harness {
    pub fn new() -> Self {
        let store = Arc::new(MemoryItemStore::new());
        let cache = Arc::new(MemoryCache::new());
        let blobs = Arc::new(MemoryBlobStore::new());
        let mut harness = Self {
            router: Router::new(),
            active_store: store.clone(),
            active_cache: cache.clone(),
            active_blobs: blobs.clone(),
            store,
            cache,
            blobs,
            request_timeout: test_config().request_timeout,
        };
        harness.rebuild();
        harness
    }

    pub fn with_store(mut self, store: Arc<dyn ItemStore>) -> Self {
        self.active_store = store;
        self.rebuild();
        self
    }

    pub fn with_cache(mut self, cache: Arc<dyn KvCache>) -> Self {
        self.active_cache = cache;
        self.rebuild();
        self
    }

    pub fn with_blobs(mut self, blobs: Arc<dyn BlobStore>) -> Self {
        self.active_blobs = blobs;
        self.rebuild();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self.rebuild();
        self
    }

    fn rebuild(&mut self) {
        let mut state = AppState::new(
            self.active_store.clone(),
            self.active_cache.clone(),
            self.active_blobs.clone(),
            &test_config(),
        );
        state.items = state.items.with_call_timeout(TEST_CACHE_CALL_TIMEOUT);
        self.router = create_router(state, self.request_timeout);
    }
}

/// Send one request and decode the JSON response body (`Null` when empty)
pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<&str>,
) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if body.is_some() {
        request = request.header(header::CONTENT_TYPE, "application/json");
    }
    let request = request
        .body(Body::from(body.unwrap_or_default().to_string()))
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn store_down() -> ItemStoreError {
    ItemStoreError::Unavailable("connection refused".to_string())
}

fn cache_down() -> CacheError {
    CacheError::Unavailable("connection refused".to_string())
}

/// Item store whose every call fails
pub struct FailingStore;

#[async_trait]
impl ItemStore for FailingStore {
    async fn write(&self, _item: NewItem) -> item_store::Result<Item> {
        Err(store_down())
    }

    async fn find_latest(&self, _id: &str) -> item_store::Result<Option<Item>> {
        Err(store_down())
    }

    async fn list_recent(&self, _limit: usize) -> item_store::Result<Vec<Item>> {
        Err(store_down())
    }

    async fn update(&self, _id: &str, _timestamp: i64, _data: ItemData) -> item_store::Result<()> {
        Err(store_down())
    }

    async fn delete(&self, _id: &str, _timestamp: i64) -> item_store::Result<()> {
        Err(store_down())
    }
}

/// Cache whose every call fails
pub struct FailingCache;

#[async_trait]
impl KvCache for FailingCache {
    async fn get(&self, _key: &str) -> kv_cache::Result<Option<String>> {
        Err(cache_down())
    }

    async fn set(&self, _key: &str, _value: String, _ttl: Ttl) -> kv_cache::Result<()> {
        Err(cache_down())
    }

    async fn delete(&self, _key: &str) -> kv_cache::Result<u64> {
        Err(cache_down())
    }

    async fn ping(&self) -> kv_cache::Result<()> {
        Err(cache_down())
    }
}

/// Cache whose every call never completes, like a Redis that accepts
/// connections but never answers
pub struct HangingCache;

#[async_trait]
impl KvCache for HangingCache {
    async fn get(&self, _key: &str) -> kv_cache::Result<Option<String>> {
        std::future::pending().await
    }

    async fn set(&self, _key: &str, _value: String, _ttl: Ttl) -> kv_cache::Result<()> {
        std::future::pending().await
    }

    async fn delete(&self, _key: &str) -> kv_cache::Result<u64> {
        std::future::pending().await
    }

    async fn ping(&self) -> kv_cache::Result<()> {
        std::future::pending().await
    }
}

pub struct FailingBlobs;

#[async_trait]
impl BlobStore for FailingBlobs {
    async fn list_objects(
        &self,
        _bucket: &str,
        _max_keys: usize,
    ) -> blob_listing::Result<Vec<BlobEntry>> {
        Err(BlobStoreError::Unavailable("access denied".to_string()))
    }
}

/// Item store that never answers within a test's patience
pub struct SlowStore;

#[async_trait]
impl ItemStore for SlowStore {
    async fn write(&self, _item: NewItem) -> item_store::Result<Item> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Err(store_down())
    }

    async fn find_latest(&self, _id: &str) -> item_store::Result<Option<Item>> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(None)
    }

    async fn list_recent(&self, _limit: usize) -> item_store::Result<Vec<Item>> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(Vec::new())
    }

    async fn update(&self, _id: &str, _timestamp: i64, _data: ItemData) -> item_store::Result<()> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(())
    }

    async fn delete(&self, _id: &str, _timestamp: i64) -> item_store::Result<()> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(())
    }
}

/// Item store that panics inside the handler
pub struct PanickingStore;

#[async_trait]
impl ItemStore for PanickingStore {
    async fn write(&self, _item: NewItem) -> item_store::Result<Item> {
        panic!("store exploded")
    }

    async fn find_latest(&self, _id: &str) -> item_store::Result<Option<Item>> {
        panic!("store exploded")
    }

    async fn list_recent(&self, _limit: usize) -> item_store::Result<Vec<Item>> {
        panic!("store exploded")
    }

    async fn update(&self, _id: &str, _timestamp: i64, _data: ItemData) -> item_store::Result<()> {
        panic!("store exploded")
    }

    async fn delete(&self, _id: &str, _timestamp: i64) -> item_store::Result<()> {
        panic!("store exploded")
    }
}
