//! # weightlru
//!
//! Thread-safe, size-bounded LRU cache with weighted capacity.
//!
//! ## Architecture
//! - **HashMap**: AHash index from key to list slot (O(1))
//! - **LRU List**: Arena-backed doubly-linked list for promotion and eviction (O(1))
//! - **Capacity**: `entry_count × item_weight` checked against `max_size`
//! - **Locking**: One `parking_lot::Mutex` per cache, held for each call
//!
//! ## Behaviour
//! - Inserts and resizes trim from the least recently used end
//! - Lookups promote on hit and count hits, misses and discards
//! - Clearing removes entries but keeps the counters

#![warn(missing_docs)]

mod cache;
mod capacity;
mod error;
mod lru;
mod stats;

pub use cache::Cache;
pub use error::{Error, Result};
pub use stats::CacheStats;
