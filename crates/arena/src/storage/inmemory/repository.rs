//! In-memory repository implementation.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use arena_core::storage::{Entity, Repository, RepositoryError, Result};

/// In-memory storage backend, generic over the entity type.
///
/// `find_all` returns entities ordered by ID.
pub struct InMemoryRepository<E: Entity> {
    entities: Arc<RwLock<BTreeMap<E::Id, E>>>,
}

impl<E: Entity> InMemoryRepository<E> {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            entities: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }
}

impl<E: Entity> Default for InMemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> Clone for InMemoryRepository<E> {
    fn clone(&self) -> Self {
        Self {
            entities: Arc::clone(&self.entities),
        }
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for InMemoryRepository<E> {
    async fn find_all(&self) -> Result<Vec<E>> {
        let entities = self.entities.read().await;
        Ok(entities.values().cloned().collect())
    }

    async fn find_by_id(&self, id: E::Id) -> Result<Option<E>> {
        let entities = self.entities.read().await;
        Ok(entities.get(&id).cloned())
    }

    async fn create(&self, entity: &E) -> Result<()> {
        let mut entities = self.entities.write().await;
        let id = entity.id();
        if entities.contains_key(&id) {
            return Err(RepositoryError::already_exists(E::KIND, id));
        }
        entities.insert(id, entity.clone());
        Ok(())
    }

    async fn update(&self, entity: &E) -> Result<()> {
        let mut entities = self.entities.write().await;
        match entities.get_mut(&entity.id()) {
            Some(existing) => {
                *existing = entity.clone();
                Ok(())
            }
            None => Err(RepositoryError::not_found(E::KIND, entity.id())),
        }
    }

    async fn delete(&self, id: E::Id) -> Result<()> {
        let mut entities = self.entities.write().await;
        if entities.remove(&id).is_none() {
            return Err(RepositoryError::not_found(E::KIND, id));
        }
        Ok(())
    }
}
