//! In-memory storage backend.
//!
//! Stores every entity in a `BTreeMap` wrapped in `Arc<RwLock<_>>`. Data is
//! lost when the process exits, which makes it the default for development
//! and tests.

mod repository;

pub use repository::InMemoryRepository;
