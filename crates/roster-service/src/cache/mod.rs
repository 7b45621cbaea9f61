//! Caching infrastructure for the service layer.
//!
//! A raw hash-cache capability ([`CacheInterface`]) with a Redis
//! implementation, the typed [`UserCache`] on top of it, and the
//! [`CacheMirror`] that runs cache writes as detached tasks.

mod cache_interface;
pub mod cache_keys;
mod mirror;
mod redis_cache;
mod user_cache;

pub use cache_interface::{CacheExt, CacheInterface};
pub use mirror::CacheMirror;
pub use redis_cache::RedisCacheService;
pub use user_cache::UserCache;
