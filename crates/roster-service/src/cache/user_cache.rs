//! Typed user cache over the raw hash capability.

use super::{cache_keys, CacheExt, CacheInterface};
use roster_config::RedisConfig;
use roster_core::{ApiResult, User, UserId};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// Best-effort cache of user records, one hash field per user.
///
/// Writes and deletes never fail: errors are logged and dropped. Reads
/// report errors so the caller can log them before falling back to the
/// store.
#[derive(Clone)]
pub struct UserCache {
    cache: Arc<dyn CacheInterface>,
    hash_key: String,
    ttl: Duration,
}

impl UserCache {
    #[must_use]
    pub fn new(cache: Arc<dyn CacheInterface>, hash_key: impl Into<String>, ttl: Duration) -> Self {
        Self {
            cache,
            hash_key: hash_key.into(),
            ttl,
        }
    }

    /// Uses the hash name and TTL from the Redis configuration.
    #[must_use]
    pub fn from_config(cache: Arc<dyn CacheInterface>, config: &RedisConfig) -> Self {
        Self::new(cache, config.hash_key.clone(), config.ttl())
    }

    /// Stores a user, resetting the expiry of the whole hash.
    pub async fn put(&self, user: &User) {
        let field = cache_keys::user_field(user.id);
        if let Err(e) = self.cache.hset(&self.hash_key, &field, user, self.ttl).await {
            warn!(user_id = %user.id, error = %e, "Failed to cache user");
        }
    }

    /// Looks a user up. A miss is `Ok(None)`.
    pub async fn get(&self, id: UserId) -> ApiResult<Option<User>> {
        self.cache
            .hget::<User>(&self.hash_key, &cache_keys::user_field(id))
            .await
    }

    /// Drops a user from the cache.
    pub async fn delete(&self, id: UserId) {
        if let Err(e) = self.cache.hdel(&self.hash_key, &cache_keys::user_field(id)).await {
            warn!(user_id = %id, error = %e, "Failed to evict user from cache");
        }
    }
}

impl std::fmt::Debug for UserCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserCache")
            .field("hash_key", &self.hash_key)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
