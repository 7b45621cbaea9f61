//! Dependency wiring.
//!
//! Builds the store pool, the cache capability and the user service from
//! configuration, and hands the result to the REST layer as [`AppState`].

use roster_config::{AppConfig, RedisConfig};
use roster_core::ApiResult;
use roster_repository::{create_pool, DatabasePool, PgUserRepository, UserRepository};
use roster_rest::AppState;
use roster_service::{CacheInterface, RedisCacheService, UserCache, UserService, UserServiceImpl};
use std::sync::Arc;
use tracing::{info, warn};

/// Everything the running server holds on to.
pub struct ServiceContainer {
    pub database: Arc<DatabasePool>,
    pub cache: Arc<dyn CacheInterface>,
    pub user_service: Arc<dyn UserService>,
}

impl ServiceContainer {
    /// Connects the store (retrying per configuration), makes sure the
    /// schema exists and sets up the cache.
    pub async fn build(config: &AppConfig) -> ApiResult<Self> {
        let database = create_pool(&config.database).await?;
        database.ensure_schema().await?;

        let cache = build_cache(&config.redis).await;
        let user_repository = Arc::new(PgUserRepository::new(database.clone()));
        let user_service = build_user_service(user_repository, cache.clone(), config);

        Ok(Self {
            database,
            cache,
            user_service,
        })
    }

    /// Returns the state shared by the HTTP handlers.
    pub fn app_state(&self) -> AppState {
        AppState::new(
            self.user_service.clone(),
            self.database.clone(),
            self.cache.clone(),
        )
    }
}

/// Builds the cache capability.
///
/// Never fails: a Redis that cannot be configured or reached is logged and
/// the service runs with cache reads degrading to misses.
pub async fn build_cache(config: &RedisConfig) -> Arc<dyn CacheInterface> {
    let service = match RedisCacheService::from_config(config) {
        Ok(service) => service,
        Err(e) => {
            warn!(error = %e, "Redis cache unavailable, continuing without it");
            return Arc::new(RedisCacheService::disabled());
        }
    };

    if !service.is_enabled() {
        info!("Redis cache disabled");
    } else if let Err(e) = service.ping().await {
        warn!(url = %config.url(), error = %e, "Redis is not reachable, continuing with cache misses");
    } else {
        info!("Connected to Redis at {}", config.url());
    }

    Arc::new(service)
}

/// Builds the cache-aside user service over any store.
pub fn build_user_service<R: UserRepository + 'static>(
    user_repository: Arc<R>,
    cache: Arc<dyn CacheInterface>,
    config: &AppConfig,
) -> Arc<dyn UserService> {
    let user_cache = UserCache::from_config(cache, &config.redis);
    Arc::new(UserServiceImpl::new(
        user_repository,
        user_cache,
        config.cache.populate_on_miss,
    ))
}
