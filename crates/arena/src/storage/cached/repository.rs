//! Generic cache-aside repository decorator.
//!
//! Key usage per operation (`<kind>` is `E::KIND`):
//!
//! | Operation    | Cache read        | On success                                 |
//! |--------------|-------------------|--------------------------------------------|
//! | `find_all`   | `<kind>:all`      | set `<kind>:all`                           |
//! | `find_by_id` | `<kind>:id:<id>`  | set `<kind>:id:<id>` (only if found)       |
//! | `create`     | -                 | delete `[<kind>:all]`                      |
//! | `update`     | -                 | delete `[<kind>:id:<id>, <kind>:all]`      |
//! | `delete`     | -                 | delete `[<kind>:id:<id>, <kind>:all]`      |
//!
//! A failed repository write touches the cache not at all. If invalidation
//! itself fails, readers may see the previous value for at most one TTL.

use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

use arena_core::cache::{collection_key_for, deserialize, entity_key_for, serialize, Cache};
use arena_core::storage::{Entity, Repository, Result};

/// Cached repository decorator.
///
/// Holds only shared handles and the TTL, so one instance can serve any
/// number of concurrent callers as long as `R` and `C` are themselves safe
/// to share.
///
/// # Type Parameters
///
/// * `E` - The entity type
/// * `R` - The underlying repository implementation
/// * `C` - The cache implementation
pub struct CachedRepository<E, R, C>
where
    E: Entity,
    R: Repository<E>,
    C: Cache,
{
    repository: Arc<R>,
    cache: Arc<C>,
    ttl: Duration,
    _entity: PhantomData<fn() -> E>,
}

impl<E, R, C> CachedRepository<E, R, C>
where
    E: Entity,
    R: Repository<E>,
    C: Cache,
{
    /// Creates a new cached repository.
    ///
    /// # Arguments
    ///
    /// * `repository` - The underlying repository to cache
    /// * `cache` - The cache implementation
    /// * `ttl` - Time-to-live for every value this decorator writes
    pub fn new(repository: Arc<R>, cache: Arc<C>, ttl: Duration) -> Self {
        Self {
            repository,
            cache,
            ttl,
            _entity: PhantomData,
        }
    }

    /// Looks up `key`, treating misses, transport errors and undecodable
    /// values alike as "not cached".
    async fn cached<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.cache.get(key).await {
            Ok(Some(bytes)) => match deserialize(&bytes) {
                Ok(value) => {
                    tracing::trace!(kind = E::KIND, key, "Cache hit");
                    Some(value)
                }
                Err(err) => {
                    tracing::warn!(kind = E::KIND, key, error = %err, "Cached value could not be decoded");
                    None
                }
            },
            Ok(None) => {
                tracing::trace!(kind = E::KIND, key, "Cache miss");
                None
            }
            Err(err) => {
                tracing::warn!(kind = E::KIND, key, error = %err, "Cache read failed, falling back to store");
                None
            }
        }
    }

    /// Stores `value` under `key` with the configured TTL.
    async fn populate<T: Serialize + Sync + ?Sized>(&self, key: &str, value: &T) {
        let bytes = match serialize(value) {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::warn!(kind = E::KIND, key, error = %err, "Failed to encode value for cache");
                return;
            }
        };

        if let Err(err) = self.cache.set(key, &bytes, Some(self.ttl)).await {
            tracing::warn!(kind = E::KIND, key, error = %err, "Failed to populate cache");
        }
    }

    /// Removes `keys` from the cache.
    async fn invalidate(&self, keys: Vec<String>) {
        if let Err(err) = self.cache.delete(&keys).await {
            tracing::warn!(kind = E::KIND, ?keys, error = %err, "Failed to invalidate cache");
        }
    }
}

#[async_trait]
impl<E, R, C> Repository<E> for CachedRepository<E, R, C>
where
    E: Entity,
    R: Repository<E> + 'static,
    C: Cache + 'static,
{
    async fn find_all(&self) -> Result<Vec<E>> {
        let cache_key = collection_key_for::<E>();

        if let Some(entities) = self.cached::<Vec<E>>(&cache_key).await {
            return Ok(entities);
        }

        let entities = self.repository.find_all().await?;
        self.populate(&cache_key, &entities).await;

        Ok(entities)
    }

    async fn find_by_id(&self, id: E::Id) -> Result<Option<E>> {
        let cache_key = entity_key_for::<E>(&id);

        if let Some(entity) = self.cached::<E>(&cache_key).await {
            return Ok(Some(entity));
        }

        let entity = self.repository.find_by_id(id).await?;

        // Absent entities are not cached; the next lookup asks the store again.
        if let Some(ref e) = entity {
            self.populate(&cache_key, e).await;
        }

        Ok(entity)
    }

    async fn create(&self, entity: &E) -> Result<()> {
        self.repository.create(entity).await?;

        // A new entity has no per-id entry yet, only the collection is stale.
        self.invalidate(vec![collection_key_for::<E>()]).await;

        tracing::debug!(kind = E::KIND, id = %entity.id(), "Entity created");
        Ok(())
    }

    async fn update(&self, entity: &E) -> Result<()> {
        self.repository.update(entity).await?;

        let id = entity.id();
        self.invalidate(vec![entity_key_for::<E>(&id), collection_key_for::<E>()])
            .await;

        tracing::debug!(kind = E::KIND, id = %id, "Entity updated");
        Ok(())
    }

    async fn delete(&self, id: E::Id) -> Result<()> {
        self.repository.delete(id.clone()).await?;

        self.invalidate(vec![entity_key_for::<E>(&id), collection_key_for::<E>()])
            .await;

        tracing::debug!(kind = E::KIND, id = %id, "Entity deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, HashMap};
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use serde::Deserialize;
    use tokio::sync::RwLock;

    use arena_core::cache::{CacheError, Result as CacheResult};
    use arena_core::game::Game;
    use arena_core::storage::RepositoryError;

    use crate::cache::MemoryCache;
    use crate::storage::InMemoryRepository;

    const TTL: Duration = Duration::from_secs(300);

    /// Game keyed by a plain integer, so keys read like `game:id:123`.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    struct TestGame {
        id: u64,
        name: String,
    }

    impl TestGame {
        fn new(id: u64, name: &str) -> Self {
            Self {
                id,
                name: name.to_string(),
            }
        }
    }

    impl Entity for TestGame {
        type Id = u64;
        const KIND: &'static str = "game";

        fn id(&self) -> u64 {
            self.id
        }
    }

    // ------------------------------------------------------------------
    // Recording cache double
    // ------------------------------------------------------------------

    #[derive(Debug, Clone, PartialEq)]
    enum CacheCall {
        Get(String),
        Set(String, Option<Duration>),
        Delete(Vec<String>),
    }

    #[derive(Default)]
    struct MockCache {
        store: RwLock<HashMap<String, Vec<u8>>>,
        calls: RwLock<Vec<CacheCall>>,
        fail_get: AtomicBool,
        fail_set: AtomicBool,
        fail_delete: AtomicBool,
    }

    impl MockCache {
        async fn preload<T: Serialize>(&self, key: &str, value: &T) {
            self.store
                .write()
                .await
                .insert(key.to_string(), serialize(value).unwrap());
        }

        async fn calls(&self) -> Vec<CacheCall> {
            self.calls.read().await.clone()
        }

        async fn writes(&self) -> Vec<CacheCall> {
            self.calls()
                .await
                .into_iter()
                .filter(|c| !matches!(c, CacheCall::Get(_)))
                .collect()
        }

        async fn contains(&self, key: &str) -> bool {
            self.store.read().await.contains_key(key)
        }
    }

    fn refused() -> CacheError {
        CacheError::ConnectionFailed("connection refused".to_string())
    }

    #[async_trait]
    impl Cache for MockCache {
        async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>> {
            self.calls.write().await.push(CacheCall::Get(key.to_string()));
            if self.fail_get.load(Ordering::SeqCst) {
                return Err(refused());
            }
            Ok(self.store.read().await.get(key).cloned())
        }

        async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> CacheResult<()> {
            self.calls
                .write()
                .await
                .push(CacheCall::Set(key.to_string(), ttl));
            if self.fail_set.load(Ordering::SeqCst) {
                return Err(refused());
            }
            self.store
                .write()
                .await
                .insert(key.to_string(), value.to_vec());
            Ok(())
        }

        async fn delete(&self, keys: &[String]) -> CacheResult<()> {
            self.calls
                .write()
                .await
                .push(CacheCall::Delete(keys.to_vec()));
            if self.fail_delete.load(Ordering::SeqCst) {
                return Err(refused());
            }
            let mut store = self.store.write().await;
            for key in keys {
                store.remove(key);
            }
            Ok(())
        }

        async fn delete_pattern(&self, pattern: &str) -> CacheResult<()> {
            let mut store = self.store.write().await;
            store.retain(|k, _| !arena_core::cache::pattern_matches(pattern, k));
            Ok(())
        }
    }

    // ------------------------------------------------------------------
    // Counting repository double
    // ------------------------------------------------------------------

    #[derive(Default)]
    struct MockRepository {
        games: RwLock<BTreeMap<u64, TestGame>>,
        find_all_calls: AtomicUsize,
        find_by_id_calls: AtomicUsize,
        fail_reads: AtomicBool,
        fail_writes: AtomicBool,
    }

    impl MockRepository {
        async fn with_games(games: &[TestGame]) -> Self {
            let repo = Self::default();
            {
                let mut map = repo.games.write().await;
                for g in games {
                    map.insert(g.id, g.clone());
                }
            }
            repo
        }

        fn store_error() -> RepositoryError {
            RepositoryError::QueryFailed("database is locked".to_string())
        }

        fn check_write(&self) -> Result<()> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(Self::store_error());
            }
            Ok(())
        }
    }

    #[async_trait]
    impl Repository<TestGame> for MockRepository {
        async fn find_all(&self) -> Result<Vec<TestGame>> {
            self.find_all_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_reads.load(Ordering::SeqCst) {
                return Err(Self::store_error());
            }
            Ok(self.games.read().await.values().cloned().collect())
        }

        async fn find_by_id(&self, id: u64) -> Result<Option<TestGame>> {
            self.find_by_id_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_reads.load(Ordering::SeqCst) {
                return Err(Self::store_error());
            }
            Ok(self.games.read().await.get(&id).cloned())
        }

        async fn create(&self, game: &TestGame) -> Result<()> {
            self.check_write()?;
            self.games.write().await.insert(game.id, game.clone());
            Ok(())
        }

        async fn update(&self, game: &TestGame) -> Result<()> {
            self.check_write()?;
            let mut games = self.games.write().await;
            if !games.contains_key(&game.id) {
                return Err(RepositoryError::not_found("game", game.id));
            }
            games.insert(game.id, game.clone());
            Ok(())
        }

        async fn delete(&self, id: u64) -> Result<()> {
            self.check_write()?;
            if self.games.write().await.remove(&id).is_none() {
                return Err(RepositoryError::not_found("game", id));
            }
            Ok(())
        }
    }

    type Decorated = CachedRepository<TestGame, MockRepository, MockCache>;

    async fn setup(games: &[TestGame]) -> (Decorated, Arc<MockRepository>, Arc<MockCache>) {
        let repo = Arc::new(MockRepository::with_games(games).await);
        let cache = Arc::new(MockCache::default());
        let cached = CachedRepository::new(repo.clone(), cache.clone(), TTL);
        (cached, repo, cache)
    }

    fn two_games() -> Vec<TestGame> {
        vec![TestGame::new(1, "Game 1"), TestGame::new(2, "Game 2")]
    }

    fn keys(keys: &[&str]) -> Vec<String> {
        keys.iter().map(|k| k.to_string()).collect()
    }

    // ------------------------------------------------------------------
    // Read path
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn test_find_all_cache_hit_skips_store() {
        let (cached, repo, cache) = setup(&[]).await;
        cache.preload("game:all", &two_games()).await;

        let result = cached.find_all().await.unwrap();

        assert_eq!(result, two_games());
        assert_eq!(repo.find_all_calls.load(Ordering::SeqCst), 0);
        assert_eq!(cache.calls().await, vec![CacheCall::Get("game:all".into())]);
    }

    #[tokio::test]
    async fn test_find_all_cache_miss_populates_cache() {
        let (cached, repo, cache) = setup(&two_games()).await;

        let result = cached.find_all().await.unwrap();

        assert_eq!(result, two_games());
        assert_eq!(repo.find_all_calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            cache.calls().await,
            vec![
                CacheCall::Get("game:all".into()),
                CacheCall::Set("game:all".into(), Some(TTL)),
            ]
        );

        let stored = cache.store.read().await.get("game:all").cloned().unwrap();
        let decoded: Vec<TestGame> = deserialize(&stored).unwrap();
        assert_eq!(decoded, two_games());
    }

    #[tokio::test]
    async fn test_find_all_second_call_is_served_from_cache() {
        let (cached, repo, _cache) = setup(&two_games()).await;

        cached.find_all().await.unwrap();
        let result = cached.find_all().await.unwrap();

        assert_eq!(result, two_games());
        assert_eq!(repo.find_all_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_find_by_id_cache_hit_skips_store() {
        let (cached, repo, cache) = setup(&[]).await;
        let game = TestGame::new(7, "Cached");
        cache.preload("game:id:7", &game).await;

        let result = cached.find_by_id(7).await.unwrap();

        assert_eq!(result, Some(game));
        assert_eq!(repo.find_by_id_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_find_by_id_cache_miss_populates_cache() {
        let (cached, repo, cache) = setup(&two_games()).await;

        let result = cached.find_by_id(2).await.unwrap();

        assert_eq!(result, Some(TestGame::new(2, "Game 2")));
        assert_eq!(repo.find_by_id_calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            cache.writes().await,
            vec![CacheCall::Set("game:id:2".into(), Some(TTL))]
        );
    }

    #[tokio::test]
    async fn test_find_by_id_absent_is_not_cached() {
        let (cached, repo, cache) = setup(&[]).await;

        assert_eq!(cached.find_by_id(404).await.unwrap(), None);
        assert_eq!(cached.find_by_id(404).await.unwrap(), None);

        assert_eq!(repo.find_by_id_calls.load(Ordering::SeqCst), 2);
        assert!(cache.writes().await.is_empty());
    }

    #[tokio::test]
    async fn test_find_by_id_cache_error_falls_back_to_store() {
        let (cached, repo, cache) = setup(&[TestGame::new(123, "Game 123")]).await;
        cache.fail_get.store(true, Ordering::SeqCst);

        let result = cached.find_by_id(123).await;

        assert_eq!(result, Ok(Some(TestGame::new(123, "Game 123"))));
        assert_eq!(repo.find_by_id_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_find_all_cache_error_falls_back_to_store() {
        let (cached, repo, cache) = setup(&two_games()).await;
        cache.fail_get.store(true, Ordering::SeqCst);

        let result = cached.find_all().await.unwrap();

        assert_eq!(result, two_games());
        assert_eq!(repo.find_all_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_cache_set_failure_does_not_fail_read() {
        let (cached, _repo, cache) = setup(&two_games()).await;
        cache.fail_set.store(true, Ordering::SeqCst);

        assert_eq!(cached.find_all().await.unwrap(), two_games());
        assert_eq!(
            cached.find_by_id(1).await.unwrap(),
            Some(TestGame::new(1, "Game 1"))
        );
    }

    #[tokio::test]
    async fn test_total_cache_outage_still_serves_reads() {
        let (cached, repo, cache) = setup(&two_games()).await;
        cache.fail_get.store(true, Ordering::SeqCst);
        cache.fail_set.store(true, Ordering::SeqCst);

        assert_eq!(cached.find_all().await.unwrap(), two_games());
        assert_eq!(cached.find_all().await.unwrap(), two_games());
        assert_eq!(repo.find_all_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_undecodable_cache_value_is_treated_as_miss() {
        let (cached, repo, cache) = setup(&two_games()).await;
        cache
            .store
            .write()
            .await
            .insert("game:all".to_string(), b"not json".to_vec());

        let result = cached.find_all().await.unwrap();

        assert_eq!(result, two_games());
        assert_eq!(repo.find_all_calls.load(Ordering::SeqCst), 1);
        // The corrupt value is overwritten with the store's answer
        let stored = cache.store.read().await.get("game:all").cloned().unwrap();
        assert_eq!(deserialize::<Vec<TestGame>>(&stored).unwrap(), two_games());
    }

    #[tokio::test]
    async fn test_store_read_error_is_propagated_without_caching() {
        let (cached, repo, cache) = setup(&two_games()).await;
        repo.fail_reads.store(true, Ordering::SeqCst);

        let err = cached.find_all().await.unwrap_err();

        assert_eq!(err, MockRepository::store_error());
        assert!(cache.writes().await.is_empty());
    }

    // ------------------------------------------------------------------
    // Write path
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn test_create_invalidates_collection_only() {
        let (cached, _repo, cache) = setup(&[]).await;

        cached.create(&TestGame::new(3, "Game 3")).await.unwrap();

        assert_eq!(
            cache.calls().await,
            vec![CacheCall::Delete(keys(&["game:all"]))]
        );
    }

    #[tokio::test]
    async fn test_update_invalidates_entity_and_collection() {
        let (cached, _repo, cache) = setup(&[TestGame::new(123, "Old")]).await;

        cached.update(&TestGame::new(123, "New")).await.unwrap();

        assert_eq!(
            cache.calls().await,
            vec![CacheCall::Delete(keys(&["game:id:123", "game:all"]))]
        );
    }

    #[tokio::test]
    async fn test_delete_invalidates_entity_and_collection() {
        let (cached, _repo, cache) = setup(&[TestGame::new(123, "Doomed")]).await;

        cached.delete(123).await.unwrap();

        assert_eq!(
            cache.calls().await,
            vec![CacheCall::Delete(keys(&["game:id:123", "game:all"]))]
        );
    }

    #[tokio::test]
    async fn test_create_is_visible_to_next_find_all() {
        let (cached, repo, _cache) = setup(&two_games()).await;

        // Prime the collection cache
        assert_eq!(cached.find_all().await.unwrap().len(), 2);

        cached.create(&TestGame::new(3, "Game 3")).await.unwrap();
        let after = cached.find_all().await.unwrap();

        assert_eq!(after.len(), 3);
        assert!(after.contains(&TestGame::new(3, "Game 3")));
        assert_eq!(repo.find_all_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_update_is_visible_to_next_reads() {
        let (cached, _repo, cache) = setup(&two_games()).await;
        cached.find_all().await.unwrap();
        cached.find_by_id(1).await.unwrap();
        assert!(cache.contains("game:id:1").await);

        cached.update(&TestGame::new(1, "Renamed")).await.unwrap();

        assert!(!cache.contains("game:id:1").await);
        assert!(!cache.contains("game:all").await);
        assert_eq!(
            cached.find_by_id(1).await.unwrap(),
            Some(TestGame::new(1, "Renamed"))
        );
        assert!(cached
            .find_all()
            .await
            .unwrap()
            .contains(&TestGame::new(1, "Renamed")));
    }

    #[tokio::test]
    async fn test_delete_is_visible_to_next_reads() {
        let (cached, _repo, _cache) = setup(&two_games()).await;
        cached.find_all().await.unwrap();
        cached.find_by_id(2).await.unwrap();

        cached.delete(2).await.unwrap();

        assert_eq!(cached.find_by_id(2).await.unwrap(), None);
        assert_eq!(
            cached.find_all().await.unwrap(),
            vec![TestGame::new(1, "Game 1")]
        );
    }

    #[tokio::test]
    async fn test_failed_store_write_leaves_cache_untouched() {
        let (cached, repo, cache) = setup(&[TestGame::new(123, "Game")]).await;
        repo.fail_writes.store(true, Ordering::SeqCst);

        let create = cached.create(&TestGame::new(5, "New")).await;
        let update = cached.update(&TestGame::new(123, "Changed")).await;
        let delete = cached.delete(123).await;

        assert_eq!(create, Err(MockRepository::store_error()));
        assert_eq!(update, Err(MockRepository::store_error()));
        assert_eq!(delete, Err(MockRepository::store_error()));
        assert!(cache.calls().await.is_empty());
    }

    #[tokio::test]
    async fn test_not_found_write_is_propagated_unchanged() {
        let (cached, _repo, cache) = setup(&[]).await;

        let err = cached.delete(99).await.unwrap_err();

        assert_eq!(err, RepositoryError::not_found("game", 99));
        assert!(cache.calls().await.is_empty());
    }

    #[tokio::test]
    async fn test_invalidation_failure_does_not_fail_write() {
        let (cached, repo, cache) = setup(&[TestGame::new(1, "Game")]).await;
        cache.fail_delete.store(true, Ordering::SeqCst);

        cached.update(&TestGame::new(1, "Updated")).await.unwrap();
        cached.create(&TestGame::new(2, "Other")).await.unwrap();
        cached.delete(2).await.unwrap();

        // Store was written even though the cache refused every delete
        assert_eq!(
            repo.games.read().await.get(&1),
            Some(&TestGame::new(1, "Updated"))
        );
        assert_eq!(cache.writes().await.len(), 3);
    }

    // ------------------------------------------------------------------
    // Real backends
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn test_with_memory_cache_and_inmemory_store() {
        let repo = Arc::new(InMemoryRepository::<Game>::new());
        let cache = Arc::new(MemoryCache::new(100).unwrap());
        let games = CachedRepository::new(repo.clone(), cache.clone(), TTL);

        let chess = Game::new("Chess");
        games.create(&chess).await.unwrap();
        assert_eq!(games.find_all().await.unwrap(), vec![chess.clone()]);
        assert!(cache.get("game:all").await.unwrap().is_some());

        let renamed = chess.clone().with_genre("Board");
        games.update(&renamed).await.unwrap();
        assert!(cache.get("game:all").await.unwrap().is_none());

        assert_eq!(games.find_by_id(chess.id).await.unwrap(), Some(renamed));
    }

    #[tokio::test]
    async fn test_cache_expiry_bounds_staleness() {
        // A write that bypasses the decorator is only visible after the TTL.
        let repo = Arc::new(InMemoryRepository::<Game>::new());
        let cache = Arc::new(MemoryCache::new(100).unwrap());
        let games = CachedRepository::new(repo.clone(), cache, Duration::from_millis(50));

        assert!(games.find_all().await.unwrap().is_empty());
        repo.create(&Game::new("Sneaky")).await.unwrap();
        assert!(games.find_all().await.unwrap().is_empty());

        tokio::time::sleep(Duration::from_millis(100)).await;

        assert_eq!(games.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_readers_share_decorator() {
        let (cached, _repo, _cache) = setup(&two_games()).await;
        let cached = Arc::new(cached);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cached = cached.clone();
                tokio::spawn(async move { cached.find_all().await })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.await.unwrap().unwrap(), two_games());
        }
    }
}
