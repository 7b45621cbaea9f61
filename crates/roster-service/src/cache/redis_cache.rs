//! Redis-based cache implementation.

use super::CacheInterface;
use async_trait::async_trait;
use deadpool_redis::redis::{self, AsyncCommands};
use deadpool_redis::{Config, Pool, Runtime};
use roster_config::RedisConfig;
use roster_core::{ApiError, ApiResult};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Redis-based cache service.
pub struct RedisCacheService {
    /// Redis connection pool; `None` when caching is disabled.
    pool: Option<Arc<Pool>>,
}

impl RedisCacheService {
    /// Create a new Redis cache service.
    #[must_use]
    pub fn new(pool: Arc<Pool>) -> Self {
        Self { pool: Some(pool) }
    }

    /// Create a no-op cache service (for when Redis is disabled).
    #[must_use]
    pub fn disabled() -> Self {
        Self { pool: None }
    }

    /// Builds the pool described by the configuration, or a disabled
    /// service when Redis is turned off.
    ///
    /// No connection is opened here; the pool connects on first use.
    pub fn from_config(config: &RedisConfig) -> ApiResult<Self> {
        if !config.enabled {
            info!("Redis disabled, caching turned off");
            return Ok(Self::disabled());
        }

        let pool = Config::from_url(config.url())
            .builder()
            .map_err(|e| ApiError::Configuration(format!("Invalid Redis config: {}", e)))?
            .max_size(config.pool_size)
            .runtime(Runtime::Tokio1)
            .build()
            .map_err(|e| ApiError::Configuration(format!("Failed to create Redis pool: {}", e)))?;

        info!("Redis connection pool created for {}", config.url());
        Ok(Self::new(Arc::new(pool)))
    }

    /// Get a connection from the pool.
    async fn get_conn(&self) -> ApiResult<deadpool_redis::Connection> {
        match &self.pool {
            Some(pool) => pool
                .get()
                .await
                .map_err(|e| ApiError::cache(format!("Failed to get Redis connection: {}", e))),
            None => Err(ApiError::cache("Cache is disabled")),
        }
    }
}

#[async_trait]
impl CacheInterface for RedisCacheService {
    fn is_enabled(&self) -> bool {
        self.pool.is_some()
    }

    async fn hget_raw(&self, hash: &str, field: &str) -> ApiResult<Option<String>> {
        if !self.is_enabled() {
            return Ok(None);
        }

        let mut conn = self.get_conn().await?;
        let value: Option<String> = conn.hget(hash, field).await.map_err(|e| {
            ApiError::cache(format!("Failed to read '{}' from '{}': {}", field, hash, e))
        })?;

        match &value {
            Some(_) => debug!("Cache hit for '{}' in '{}'", field, hash),
            None => debug!("Cache miss for '{}' in '{}'", field, hash),
        }

        Ok(value)
    }

    async fn hset_raw(&self, hash: &str, field: &str, value: &str, ttl: Duration) -> ApiResult<()> {
        if !self.is_enabled() {
            return Ok(());
        }

        let mut conn = self.get_conn().await?;
        let ttl_secs = i64::try_from(ttl.as_secs().max(1)).unwrap_or(i64::MAX);

        redis::pipe()
            .atomic()
            .hset(hash, field, value)
            .ignore()
            .expire(hash, ttl_secs)
            .ignore()
            .query_async::<()>(&mut conn)
            .await
            .map_err(|e| {
                ApiError::cache(format!("Failed to write '{}' to '{}': {}", field, hash, e))
            })?;

        debug!("Cached '{}' in '{}' with TTL {}s", field, hash, ttl_secs);
        Ok(())
    }

    async fn hdel(&self, hash: &str, field: &str) -> ApiResult<bool> {
        if !self.is_enabled() {
            return Ok(false);
        }

        let mut conn = self.get_conn().await?;
        let removed: i64 = conn.hdel(hash, field).await.map_err(|e| {
            ApiError::cache(format!("Failed to delete '{}' from '{}': {}", field, hash, e))
        })?;

        debug!("Deleted '{}' from '{}': {}", field, hash, removed > 0);
        Ok(removed > 0)
    }

    async fn ping(&self) -> ApiResult<()> {
        let mut conn = self.get_conn().await?;
        redis::cmd("PING")
            .query_async::<String>(&mut conn)
            .await
            .map_err(|e| ApiError::cache(format!("PING failed: {}", e)))?;
        Ok(())
    }
}

impl std::fmt::Debug for RedisCacheService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCacheService")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}
