//! Cache module for storing API responses to disk
//!
//! Search responses are written verbatim to `result/`, one file per season
//! query. The file name doubles as the lookup key, so a repeated query is
//! answered from disk without touching the network.

mod manager;

pub use manager::{CacheKey, CacheManager, DEFAULT_CACHE_DIR};
