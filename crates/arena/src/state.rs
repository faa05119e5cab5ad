//! Application state with repository-based storage.
//!
//! Handlers only ever see `Arc<dyn Repository<_>>`. Whether those are backed
//! by SQLite or memory, and whether reads go through Redis or the in-process
//! LRU, is decided here at compile time from the `sqlite` and `redis` features.

use std::sync::Arc;
use std::time::Duration;

use arena_core::cache::Cache;
use arena_core::game::Game;
use arena_core::storage::{Entity, Repository};
use arena_core::tournament::{Notifier, Tournament};

use crate::config::Config;
use crate::notify::LogObserver;
use crate::storage::CachedRepository;

/// Shared application state.
///
/// This is cloned for each request handler.
#[derive(Clone)]
pub struct AppState {
    /// Game repository (cached, wraps underlying storage).
    pub game_repo: Arc<dyn Repository<Game>>,
    /// Tournament repository (cached, wraps underlying storage).
    pub tournament_repo: Arc<dyn Repository<Tournament>>,
    /// Observers invoked after a tournament is created.
    pub tournament_notifier: Arc<Notifier<Tournament>>,
    /// Name of the storage backend, reported by `/healthz`.
    pub storage_backend: &'static str,
    /// Name of the cache backend, reported by `/healthz`.
    pub cache_backend: &'static str,
}

impl AppState {
    /// Creates the state for the configured backends.
    pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
        let ttl = config.cache_ttl();
        let (games, tournaments) = open_stores(config).await?;
        let cache = connect_cache(config).await?;

        tracing::info!(
            storage = STORAGE_BACKEND,
            cache = CACHE_BACKEND,
            ttl_seconds = ttl.as_secs(),
            "Repositories initialised"
        );

        Ok(Self {
            game_repo: cached(games, cache.clone(), ttl),
            tournament_repo: cached(tournaments, cache, ttl),
            tournament_notifier: Arc::new(default_notifier()),
            storage_backend: STORAGE_BACKEND,
            cache_backend: CACHE_BACKEND,
        })
    }
}

/// Wraps a store in the cache-aside decorator and erases its type.
fn cached<E, R, C>(repository: Arc<R>, cache: Arc<C>, ttl: Duration) -> Arc<dyn Repository<E>>
where
    E: Entity,
    R: Repository<E> + 'static,
    C: Cache + 'static,
{
    Arc::new(CachedRepository::new(repository, cache, ttl))
}

fn default_notifier() -> Notifier<Tournament> {
    Notifier::new().with_observer(Arc::new(LogObserver))
}

// ============================================================================
// Backend selection
// ============================================================================

#[cfg(feature = "sqlite")]
const STORAGE_BACKEND: &str = "sqlite";

#[cfg(not(feature = "sqlite"))]
const STORAGE_BACKEND: &str = "inmemory";

#[cfg(feature = "redis")]
const CACHE_BACKEND: &str = "redis";

#[cfg(not(feature = "redis"))]
const CACHE_BACKEND: &str = "memory";

/// Opens one SQLite database serving both entity kinds.
#[cfg(feature = "sqlite")]
async fn open_stores(
    config: &Config,
) -> Result<
    (
        Arc<crate::storage::SqliteRepository>,
        Arc<crate::storage::SqliteRepository>,
    ),
    anyhow::Error,
> {
    let repo = Arc::new(crate::storage::SqliteRepository::new(&config.sqlite_path).await?);
    tracing::info!(path = %config.sqlite_path, "Opened SQLite database");
    Ok((repo.clone(), repo))
}

/// Creates one in-memory store per entity kind.
#[cfg(not(feature = "sqlite"))]
async fn open_stores(
    _config: &Config,
) -> Result<
    (
        Arc<crate::storage::InMemoryRepository<Game>>,
        Arc<crate::storage::InMemoryRepository<Tournament>>,
    ),
    anyhow::Error,
> {
    Ok((
        Arc::new(crate::storage::InMemoryRepository::new()),
        Arc::new(crate::storage::InMemoryRepository::new()),
    ))
}

/// Builds the Redis cache. An unreachable server is not fatal.
#[cfg(feature = "redis")]
async fn connect_cache(config: &Config) -> Result<Arc<crate::cache::RedisCache>, anyhow::Error> {
    Ok(Arc::new(
        crate::cache::RedisCache::connect(&config.redis_url).await?,
    ))
}

#[cfg(not(feature = "redis"))]
async fn connect_cache(config: &Config) -> Result<Arc<crate::cache::MemoryCache>, anyhow::Error> {
    Ok(Arc::new(crate::cache::MemoryCache::new(
        config.cache_max_entries,
    )?))
}

#[cfg(test)]
impl AppState {
    /// Creates a fully in-process state regardless of enabled features.
    ///
    /// Useful for tests that exercise the HTTP layer.
    pub fn in_memory(ttl: Duration, max_entries: usize) -> Result<Self, anyhow::Error> {
        use crate::cache::MemoryCache;
        use crate::storage::InMemoryRepository;

        let cache = Arc::new(MemoryCache::new(max_entries)?);

        Ok(Self {
            game_repo: cached(Arc::new(InMemoryRepository::<Game>::new()), cache.clone(), ttl),
            tournament_repo: cached(
                Arc::new(InMemoryRepository::<Tournament>::new()),
                cache,
                ttl,
            ),
            tournament_notifier: Arc::new(default_notifier()),
            storage_backend: "inmemory",
            cache_backend: "memory",
        })
    }

    /// Replaces the tournament notifier.
    pub fn with_tournament_notifier(mut self, notifier: Notifier<Tournament>) -> Self {
        self.tournament_notifier = Arc::new(notifier);
        self
    }
}
