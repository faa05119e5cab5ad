use std::{env, time::Duration};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Cache TTL in seconds (default: 300)
    pub cache_ttl_seconds: u64,
    /// Maximum number of cache entries (default: 10,000)
    pub cache_max_entries: usize,
    /// Path to SQLite database file (default: "arena.db")
    /// Note: Only used when the `sqlite` feature is enabled.
    #[cfg_attr(not(feature = "sqlite"), allow(dead_code))]
    pub sqlite_path: String,
    /// Redis connection URL (default: "redis://localhost:6379")
    /// Note: Only used when the `redis` feature is enabled.
    #[cfg_attr(not(feature = "redis"), allow(dead_code))]
    pub redis_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `CACHE_TTL_SECONDS` - Cache TTL in seconds (default: 300)
    /// - `CACHE_MAX_ENTRIES` - Maximum cache entries (default: 10,000)
    /// - `SQLITE_PATH` - SQLite database path (default: "arena.db")
    /// - `REDIS_URL` - Redis connection URL (default: "redis://localhost:6379")
    ///
    /// Unparseable numbers fall back to their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            cache_ttl_seconds: lookup("CACHE_TTL_SECONDS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
            cache_max_entries: lookup("CACHE_MAX_ENTRIES")
                .and_then(|v| v.parse().ok())
                .unwrap_or(10_000),
            sqlite_path: lookup("SQLITE_PATH").unwrap_or_else(|| "arena.db".to_string()),
            redis_url: lookup("REDIS_URL")
                .unwrap_or_else(|| "redis://localhost:6379".to_string()),
        }
    }

    /// Get cache TTL as a Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
