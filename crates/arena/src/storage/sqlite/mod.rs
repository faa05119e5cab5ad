//! SQLite storage backend implementation.
//!
//! Uses `rusqlite` for the synchronous work and `tokio-rusqlite` to run it on
//! a dedicated thread without blocking the runtime.

mod conversions;
mod error;
mod repository;
mod schema;

pub use repository::SqliteRepository;
