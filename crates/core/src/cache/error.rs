use thiserror::Error;

/// Errors that can occur during cache operations.
///
/// A missing or expired key is not an error: [`Cache::get`](super::Cache::get)
/// reports it as `Ok(None)`. Every variant here is a transport-level failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CacheError {
    #[error("Cache connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Cache operation failed: {0}")]
    OperationFailed(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
