//! Snapshot caching.
//!
//! - [`store`] - Injected key-value capability ([`MemoryStore`], [`FileStore`])
//! - [`freshness`] - Time-bounded snapshot cache on top of a store

pub mod freshness;
pub mod store;

pub use freshness::{CachedSnapshot, FreshnessCache};
pub use store::{FileStore, KeyValueStore, MemoryStore};
