//! Storage backend implementations.
//!
//! This module provides concrete implementations of the `Repository` trait
//! defined in `arena_core::storage`, plus the cache-aside decorator that
//! wraps any of them:
//!
//! - `inmemory`: `BTreeMap`-backed store, used by default and in tests
//! - `sqlite` (feature `sqlite`): persistent store using `rusqlite` and
//!   `tokio-rusqlite`
//! - `cached`: `CachedRepository`, the read-through/write-invalidate layer
//!
//! # Examples
//!
//! Build with the in-memory store (default):
//! ```bash
//! cargo build -p arena
//! ```
//!
//! Build with SQLite:
//! ```bash
//! cargo build -p arena --features sqlite
//! ```

pub mod cached;
pub mod inmemory;

#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use cached::CachedRepository;
pub use inmemory::InMemoryRepository;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteRepository;
