//! Redis-backed cache

use crate::cache::{KvCache, Ttl};
use crate::error::{CacheError, Result};
use async_trait::async_trait;
use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use redis::AsyncCommands;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::debug;

/// Bound on opening (or reopening) the connection
const CONNECTION_TIMEOUT: Duration = Duration::from_secs(2);
/// Bound on a single command round-trip
const RESPONSE_TIMEOUT: Duration = Duration::from_secs(2);
/// Reconnect attempts before a call fails
const RECONNECT_RETRIES: usize = 1;

fn manager_config() -> ConnectionManagerConfig {
    ConnectionManagerConfig::new()
        .set_connection_timeout(CONNECTION_TIMEOUT)
        .set_response_timeout(RESPONSE_TIMEOUT)
        .set_number_of_retries(RECONNECT_RETRIES)
}

/// Cache over a single Redis endpoint.
///
/// The connection is opened on first use rather than at construction, so the
/// service can start while Redis is down. Once established, the connection
/// manager reconnects on its own.
pub struct RedisCache {
    client: redis::Client,
    endpoint: String,
    connection: OnceCell<ConnectionManager>,
}

impl RedisCache {
    /// Build a cache for `host:port`. An empty host means localhost.
    pub fn new(host: &str, port: &str) -> Result<Self> {
        let host = if host.is_empty() { "127.0.0.1" } else { host };
        let endpoint = format!("{}:{}", host, port);
        let url = format!("redis://{}/", endpoint);

        let client = redis::Client::open(url.as_str())
            .map_err(|e| CacheError::InvalidEndpoint(format!("{}: {}", endpoint, e)))?;

        Ok(Self {
            client,
            endpoint,
            connection: OnceCell::new(),
        })
    }

    /// `host:port` this cache talks to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn connection(&self) -> Result<ConnectionManager> {
        let manager = self
            .connection
            .get_or_try_init(|| async {
                debug!(endpoint = %self.endpoint, "Connecting to Redis");
                ConnectionManager::new_with_config(self.client.clone(), manager_config()).await
            })
            .await?;
        Ok(manager.clone())
    }
}

#[async_trait]
impl KvCache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.connection().await?;
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: String, ttl: Ttl) -> Result<()> {
        let mut conn = self.connection().await?;
        let mut cmd = redis::cmd("SET");
        cmd.arg(key).arg(value);
        if let Some(ttl) = ttl.as_duration() {
            cmd.arg("EX").arg(ttl.as_secs().max(1));
        }
        let _: () = cmd.query_async(&mut conn).await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<u64> {
        let mut conn = self.connection().await?;
        let removed: u64 = conn.del(key).await?;
        Ok(removed)
    }

    async fn ping(&self) -> Result<()> {
        let mut conn = self.connection().await?;
        let _: () = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }
}
