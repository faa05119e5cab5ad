use std::fmt::Display;

use serde::{de::DeserializeOwned, Serialize};

/// A record with a stable identifier that can be persisted and cached.
///
/// Entities carry no cache-specific fields. The cache stores whatever the
/// store returns, serialized as JSON.
pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Identifier type. Its `Display` output is embedded in cache keys.
    type Id: Display + Clone + Ord + Send + Sync + 'static;

    /// Namespace for this entity in the cache key scheme (e.g. `"game"`).
    const KIND: &'static str;

    /// Returns the identifier of this entity.
    fn id(&self) -> Self::Id;
}
