//! In-memory cache implementation with LRU eviction.
//!
//! Expired entries are removed lazily, when they are next read.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use lru::LruCache;
use tokio::sync::Mutex;

use arena_core::cache::{pattern_matches, Cache, CacheError, Result};

/// A single cache entry with optional expiration.
#[derive(Debug, Clone)]
struct CacheEntry {
    value: Vec<u8>,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn new(value: Vec<u8>, ttl: Option<Duration>) -> Self {
        let expires_at = ttl.map(|d| Instant::now() + d);
        Self { value, expires_at }
    }

    fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|exp| Instant::now() >= exp)
    }
}

/// In-memory cache implementation with LRU eviction.
///
/// Every access (including `get`) updates LRU order, so the store sits
/// behind a `Mutex` rather than a `RwLock`.
#[derive(Debug, Clone)]
pub struct MemoryCache {
    store: Arc<Mutex<LruCache<String, CacheEntry>>>,
}

impl MemoryCache {
    /// Creates a new in-memory cache holding at most `max_entries` values.
    ///
    /// # Errors
    ///
    /// Returns `CacheError::OperationFailed` if `max_entries` is 0.
    pub fn new(max_entries: usize) -> Result<Self> {
        let capacity = NonZeroUsize::new(max_entries).ok_or_else(|| {
            CacheError::OperationFailed("max_entries must be > 0".to_string())
        })?;
        Ok(Self {
            store: Arc::new(Mutex::new(LruCache::new(capacity))),
        })
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut store = self.store.lock().await;

        match store.get(key) {
            Some(entry) if !entry.is_expired() => return Ok(Some(entry.value.clone())),
            Some(_) => {}
            None => return Ok(None),
        }

        store.pop(key);
        Ok(None)
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()> {
        let mut store = self.store.lock().await;
        store.put(key.to_string(), CacheEntry::new(value.to_vec(), ttl));
        Ok(())
    }

    async fn delete(&self, keys: &[String]) -> Result<()> {
        if keys.is_empty() {
            return Ok(());
        }

        let mut store = self.store.lock().await;
        for key in keys {
            store.pop(key);
        }
        Ok(())
    }

    async fn delete_pattern(&self, pattern: &str) -> Result<()> {
        let mut store = self.store.lock().await;
        let matching: Vec<String> = store
            .iter()
            .filter(|(key, _)| pattern_matches(pattern, key))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &matching {
            store.pop(key);
        }

        tracing::trace!(pattern, removed = matching.len(), "Deleted keys by pattern");
        Ok(())
    }
}
