//! Functional core for the arena backend.
//!
//! Everything in this crate is free of I/O: capability traits for the cache
//! and the persistent store, the cache key scheme, JSON cache serialization,
//! and the game/tournament domain types. Concrete backends and the cached
//! repository decorator live in the `arena` binary crate.

pub mod cache;
pub mod game;
pub mod storage;
pub mod tournament;
