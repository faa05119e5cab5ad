//! Redis cache implementation.
//!
//! Pattern deletion walks the keyspace with `SCAN MATCH` (never `KEYS`) and
//! removes matches in batches. It is not atomic: keys written while the scan
//! runs may survive, and TTL expiry bounds how long they stay stale.
//!
//! The connection is established lazily. Until Redis answers, every operation
//! fails with `CacheError::ConnectionFailed`, which the cached repository
//! treats as a miss, so the service keeps serving from storage.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use redis::AsyncCommands;
use tokio::sync::{Mutex, OnceCell};

use arena_core::cache::{Cache, CacheError, Result};

use super::error::map_redis_error;

/// Maximum number of keys per `DEL` issued by `delete_pattern`.
const DELETE_BATCH_SIZE: usize = 500;

/// Upper bound for establishing a TCP connection.
const CONNECTION_TIMEOUT: Duration = Duration::from_secs(1);

/// Upper bound for a single command round trip.
const RESPONSE_TIMEOUT: Duration = Duration::from_secs(1);

/// Reconnect attempts made by the manager before giving up.
const CONNECTION_RETRIES: usize = 1;

/// Longest backoff between reconnect attempts, in milliseconds.
const MAX_RETRY_DELAY_MS: u64 = 1000;

/// How long a failed connect short-circuits further attempts.
const RECONNECT_COOLDOWN: Duration = Duration::from_secs(5);

fn manager_config() -> ConnectionManagerConfig {
    ConnectionManagerConfig::new()
        .set_connection_timeout(CONNECTION_TIMEOUT)
        .set_response_timeout(RESPONSE_TIMEOUT)
        .set_number_of_retries(CONNECTION_RETRIES)
        .set_max_delay(MAX_RETRY_DELAY_MS)
}

/// Redis cache backend using connection manager for pooling.
pub struct RedisCache {
    client: redis::Client,
    conn: OnceCell<ConnectionManager>,
    last_failure: Mutex<Option<Instant>>,
}

impl RedisCache {
    /// Creates a Redis cache without connecting.
    ///
    /// # Errors
    ///
    /// Returns `CacheError::OperationFailed` if `url` is not a valid Redis URL.
    pub fn new(url: &str) -> Result<Self> {
        let client = redis::Client::open(url).map_err(map_redis_error)?;
        Ok(Self {
            client,
            conn: OnceCell::new(),
            last_failure: Mutex::new(None),
        })
    }

    /// Creates a Redis cache and makes one bounded connection attempt.
    ///
    /// An unreachable server is logged and tolerated; the connection is
    /// retried on later operations.
    ///
    /// # Arguments
    ///
    /// * `url` - Redis connection URL (e.g., "redis://localhost:6379")
    ///
    /// # Errors
    ///
    /// Only fails if `url` is not a valid Redis URL.
    pub async fn connect(url: &str) -> Result<Self> {
        let cache = Self::new(url)?;
        match cache.connection().await {
            Ok(_) => tracing::info!(url, "Connected to Redis"),
            Err(e) => tracing::warn!(url, error = %e, "Redis unavailable, serving from storage"),
        }
        Ok(cache)
    }

    async fn connection(&self) -> Result<ConnectionManager> {
        if let Some(conn) = self.conn.get() {
            return Ok(conn.clone());
        }

        {
            let last_failure = self.last_failure.lock().await;
            if let Some(at) = *last_failure {
                if at.elapsed() < RECONNECT_COOLDOWN {
                    return Err(CacheError::ConnectionFailed(
                        "Redis unavailable, waiting before reconnecting".to_string(),
                    ));
                }
            }
        }

        let result = self
            .conn
            .get_or_try_init(|| {
                ConnectionManager::new_with_config(self.client.clone(), manager_config())
            })
            .await;

        match result {
            Ok(conn) => {
                *self.last_failure.lock().await = None;
                Ok(conn.clone())
            }
            Err(e) => {
                *self.last_failure.lock().await = Some(Instant::now());
                tracing::debug!(error = %e, "Redis connect failed");
                Err(CacheError::ConnectionFailed(e.to_string()))
            }
        }
    }
}

#[async_trait]
impl Cache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.connection().await?;
        let result: Option<Vec<u8>> = conn.get(key).await.map_err(map_redis_error)?;
        Ok(result)
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()> {
        let mut conn = self.connection().await?;

        match ttl {
            Some(duration) => {
                // SET EX has whole-second resolution; never round down to "no expiry"
                let seconds = duration.as_secs().max(1);
                conn.set_ex::<_, _, ()>(key, value, seconds)
                    .await
                    .map_err(map_redis_error)?;
            }
            None => {
                conn.set::<_, _, ()>(key, value)
                    .await
                    .map_err(map_redis_error)?;
            }
        }

        Ok(())
    }

    async fn delete(&self, keys: &[String]) -> Result<()> {
        if keys.is_empty() {
            return Ok(());
        }

        let mut conn = self.connection().await?;
        conn.del::<_, ()>(keys.to_vec()).await.map_err(map_redis_error)?;
        Ok(())
    }

    async fn delete_pattern(&self, pattern: &str) -> Result<()> {
        let mut conn = self.connection().await?;

        let matching: Vec<String> = {
            let mut iter = conn
                .scan_match::<_, String>(pattern)
                .await
                .map_err(map_redis_error)?;
            let mut keys = Vec::new();
            while let Some(key) = iter.next_item().await {
                keys.push(key);
            }
            keys
        };

        for batch in matching.chunks(DELETE_BATCH_SIZE) {
            conn.del::<_, ()>(batch.to_vec()).await.map_err(map_redis_error)?;
        }

        tracing::trace!(pattern, removed = matching.len(), "Deleted keys by pattern");
        Ok(())
    }
}
