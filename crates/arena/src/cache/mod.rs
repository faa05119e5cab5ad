//! Cache backend implementations.
//!
//! This module provides concrete implementations of the `Cache` trait
//! defined in `arena_core::cache`:
//!
//! - `MemoryCache`: in-process LRU cache with TTL, always available and used
//!   by default
//! - `RedisCache` (feature `redis`): shared cache for multi-instance
//!   deployments

pub mod memory;

#[cfg(feature = "redis")]
pub mod redis_impl;

pub use memory::MemoryCache;

#[cfg(feature = "redis")]
pub use redis_impl::RedisCache;
