mod error;
mod keys;
mod patterns;
mod serialization;
mod traits;

pub use error::{CacheError, Result};
pub use keys::{
    collection_key, collection_key_for, entity_key, entity_key_for, kind_pattern,
    kind_pattern_for,
};
pub use patterns::pattern_matches;
pub use serialization::{deserialize, serialize, SerializationError};
pub use traits::Cache;
