//! Caching adapters layered over the driven ports.

pub mod user_cache;

pub use user_cache::{CacheStats, UserCache, UserCacheConfig};
