//! Cached repository decorator.
//!
//! This module provides a single generic decorator that wraps any
//! `Repository<E>` with caching behavior. The decorator implements the
//! cache-aside pattern:
//!
//! - **Reads**: Check cache first, on miss fetch from repository and populate cache
//! - **Writes**: Persist to repository, then invalidate the affected keys
//!
//! The cache is an optimization only. Every cache failure is logged and
//! swallowed; user-visible errors originate exclusively from the repository.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let repo = Arc::new(InMemoryRepository::<Game>::new());
//! let cache = Arc::new(MemoryCache::new(10_000)?);
//!
//! let games = CachedRepository::new(repo, cache, Duration::from_secs(300));
//! ```

mod repository;

pub use repository::CachedRepository;
