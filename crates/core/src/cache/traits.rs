use std::time::Duration;

use async_trait::async_trait;

use super::Result;

/// Capability interface over a key-value store with expiry.
///
/// Values are opaque bytes; typed access goes through
/// [`serialize`](super::serialize) and [`deserialize`](super::deserialize).
#[async_trait]
pub trait Cache: Send + Sync {
    /// Gets a value from the cache by key.
    ///
    /// Returns `Ok(None)` when the key is absent or expired (a miss) and
    /// `Err` only for transport failures.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Sets a value in the cache with an optional TTL, overwriting any
    /// existing value.
    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()>;

    /// Deletes zero or more keys. Absent keys are ignored.
    async fn delete(&self, keys: &[String]) -> Result<()>;

    /// Deletes all values matching a glob pattern (e.g., "game:*").
    async fn delete_pattern(&self, pattern: &str) -> Result<()>;
}
