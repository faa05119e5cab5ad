//! Redis error mapping to CacheError.
//!
//! The cached repository treats `ConnectionFailed` as "cache unavailable" and
//! falls back to the store, so anything that means the server cannot be
//! reached lands there. Everything else is an `OperationFailed`.

use arena_core::cache::CacheError;

/// Maps Redis errors to CacheError.
pub fn map_redis_error(err: redis::RedisError) -> CacheError {
    if is_unavailable(&err) {
        CacheError::ConnectionFailed(err.to_string())
    } else {
        CacheError::OperationFailed(err.to_string())
    }
}

fn is_unavailable(err: &redis::RedisError) -> bool {
    err.is_io_error()
        || err.is_connection_refusal()
        || err.is_timeout()
        || err.is_connection_dropped()
        || err.is_unrecoverable_error()
}
