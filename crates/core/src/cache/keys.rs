//! Cache key scheme.
//!
//! Every key the cached repository reads or invalidates is built here, so the
//! read path and the write path always agree on the format:
//!
//! - `"<kind>:all"` for the unfiltered collection
//! - `"<kind>:id:<id>"` for a single entity

use std::fmt::Display;

use crate::storage::Entity;

/// Returns the cache key for the whole collection of an entity kind.
pub fn collection_key(kind: &str) -> String {
    format!("{}:all", kind)
}

/// Returns the cache key for a single entity.
pub fn entity_key(kind: &str, id: impl Display) -> String {
    format!("{}:id:{}", kind, id)
}

/// Returns the pattern matching every key of an entity kind.
pub fn kind_pattern(kind: &str) -> String {
    format!("{}:*", kind)
}

/// Returns the collection key for `E`, namespaced by [`Entity::KIND`].
pub fn collection_key_for<E: Entity>() -> String {
    collection_key(E::KIND)
}

/// Returns the per-id key for `E`, namespaced by [`Entity::KIND`].
pub fn entity_key_for<E: Entity>(id: &E::Id) -> String {
    entity_key(E::KIND, id)
}

/// Returns the pattern matching every cached key for `E`.
pub fn kind_pattern_for<E: Entity>() -> String {
    kind_pattern(E::KIND)
}
