//! Common test infrastructure for Redis integration tests.

use deadpool_redis::{redis, Config, Connection, Pool, Runtime};
use roster_config::RedisConfig;
use roster_service::RedisCacheService;
use testcontainers::{runners::AsyncRunner, ContainerAsync};
use testcontainers_modules::redis::Redis;

/// Test Redis container wrapper.
///
/// Holds the container alive and a separate pool for inspecting the keys
/// the cache writes.
pub struct TestRedis {
    _container: ContainerAsync<Redis>,
    config: RedisConfig,
    pool: Pool,
}

impl TestRedis {
    /// Starts a fresh Redis container.
    pub async fn new() -> Self {
        let container = Redis::default()
            .start()
            .await
            .expect("Failed to start Redis container");

        let port = container
            .get_host_port_ipv4(6379)
            .await
            .expect("Failed to get Redis port");

        let config = RedisConfig {
            host: "127.0.0.1".to_string(),
            port,
            pool_size: 4,
            ..RedisConfig::default()
        };

        let pool = Config::from_url(config.url())
            .create_pool(Some(Runtime::Tokio1))
            .expect("Failed to create inspection pool");

        Self {
            _container: container,
            config,
            pool,
        }
    }

    pub fn config(&self) -> &RedisConfig {
        &self.config
    }

    /// Builds the cache service under test.
    pub fn cache_service(&self) -> RedisCacheService {
        RedisCacheService::from_config(&self.config).expect("Failed to create cache service")
    }

    async fn conn(&self) -> Connection {
        self.pool.get().await.expect("Failed to get Redis connection")
    }

    /// Remaining lifetime of a key in seconds (`-2` when absent).
    pub async fn ttl(&self, key: &str) -> i64 {
        redis::cmd("TTL")
            .arg(key)
            .query_async::<i64>(&mut self.conn().await)
            .await
            .expect("TTL failed")
    }

    /// Sets a short expiry on a key.
    pub async fn expire(&self, key: &str, secs: i64) {
        redis::cmd("EXPIRE")
            .arg(key)
            .arg(secs)
            .query_async::<i64>(&mut self.conn().await)
            .await
            .expect("EXPIRE failed");
    }

    /// Number of fields in a hash.
    pub async fn hlen(&self, key: &str) -> i64 {
        redis::cmd("HLEN")
            .arg(key)
            .query_async::<i64>(&mut self.conn().await)
            .await
            .expect("HLEN failed")
    }

    /// Raw value of one hash field.
    pub async fn hget(&self, key: &str, field: &str) -> Option<String> {
        redis::cmd("HGET")
            .arg(key)
            .arg(field)
            .query_async::<Option<String>>(&mut self.conn().await)
            .await
            .expect("HGET failed")
    }
}
