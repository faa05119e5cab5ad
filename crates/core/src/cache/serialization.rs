//! Pure functions for converting values to and from cache bytes.
//!
//! Values are stored as JSON so cached entries stay human-readable when
//! inspected with `redis-cli` or similar tools.

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

use super::CacheError;

/// Errors that can occur during cache serialization/deserialization.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SerializationError {
    /// Failed to serialize a value to bytes.
    #[error("Failed to serialize: {0}")]
    SerializeFailed(String),
    /// Failed to deserialize bytes to a value.
    #[error("Failed to deserialize: {0}")]
    DeserializeFailed(String),
}

impl From<SerializationError> for CacheError {
    fn from(err: SerializationError) -> Self {
        CacheError::Serialization(err.to_string())
    }
}

/// Result type for serialization operations.
pub type Result<T> = std::result::Result<T, SerializationError>;

/// Serializes any value to JSON bytes.
pub fn serialize<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(value).map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

/// Deserializes JSON bytes into the requested shape.
pub fn deserialize<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(|e| SerializationError::DeserializeFailed(e.to_string()))
}
