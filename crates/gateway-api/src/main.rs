//! Gateway API - HTTP front for the item table, cache and data bucket

use aws_config::{BehaviorVersion, Region};
use blob_listing::S3BlobStore;
use gateway_api::{create_router, start_server, AppState, Config, Result};
use item_store::DynamoItemStore;
use kv_cache::{KvCache, RedisCache};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{prelude::*, EnvFilter};

const STARTUP_PING_TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let env_filter = EnvFilter::from_default_env().add_directive("gateway_api=info".parse()?);

    // Use JSON format for GCP Cloud Logging when LOG_FORMAT=json
    if std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false)
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_stackdriver::layer())
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    };

    info!("Starting Gateway API...");

    let config = Config::from_env();
    info!("Environment: {}", config.environment);
    info!("Region: {}", config.aws_region);
    info!("Data bucket: {}", config.s3_bucket_data);
    info!("Static bucket: {}", config.s3_bucket_static);
    info!("Request timeout: {:?}", config.request_timeout);
    if config.dynamodb_table.is_empty() {
        warn!("DYNAMODB_TABLE is not set; item operations will fail");
    }

    let aws = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(config.aws_region.clone()))
        .load()
        .await;

    let store = DynamoItemStore::new(
        aws_sdk_dynamodb::Client::new(&aws),
        config.dynamodb_table.clone(),
    );
    info!("DynamoDB table: {}", store.table());
    let blobs = S3BlobStore::new(aws_sdk_s3::Client::new(&aws));
    let cache = RedisCache::new(&config.redis_endpoint, &config.redis_port)?;
    info!("Redis: {}", cache.endpoint());

    // Redis being down is not fatal; health reports it
    match tokio::time::timeout(STARTUP_PING_TIMEOUT, cache.ping()).await {
        Ok(Ok(())) => info!("Connected to Redis"),
        Ok(Err(e)) => warn!(error = %e, "Redis is unreachable, continuing without it"),
        Err(_) => warn!("Redis ping timed out, continuing without it"),
    }

    let state = AppState::new(Arc::new(store), Arc::new(cache), Arc::new(blobs), &config);
    let router = create_router(state, config.request_timeout);

    start_server(router, config.port).await?;

    Ok(())
}
