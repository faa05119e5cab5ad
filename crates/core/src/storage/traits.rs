use async_trait::async_trait;

use super::{Entity, Result};

/// Canonical CRUD contract over a persistent collection of entities.
///
/// Backends (in-memory, SQLite) implement it directly; the cached decorator
/// implements it too, so callers cannot tell the two apart.
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// Gets every entity in the collection.
    async fn find_all(&self) -> Result<Vec<E>>;

    /// Gets an entity by its ID. Returns `Ok(None)` if it does not exist.
    async fn find_by_id(&self, id: E::Id) -> Result<Option<E>>;

    /// Creates a new entity.
    async fn create(&self, entity: &E) -> Result<()>;

    /// Updates an existing entity.
    async fn update(&self, entity: &E) -> Result<()>;

    /// Deletes an entity by its ID.
    async fn delete(&self, id: E::Id) -> Result<()>;
}
