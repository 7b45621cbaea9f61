//! Database connection pool management.

use async_trait::async_trait;
use roster_config::DatabaseConfig;
use roster_core::{ApiError, ApiResult};
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions, PgSslMode};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Liveness probe for a backing service.
#[async_trait]
pub trait HealthCheck: Send + Sync {
    /// Returns `Ok(())` when the service answers.
    async fn health_check(&self) -> ApiResult<()>;
}

/// Database pool wrapper.
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    /// Creates a pool from configuration and waits until the server answers.
    ///
    /// The server is pinged up to `connect_attempts` times,
    /// `connect_retry_interval_secs` apart, before giving up.
    pub async fn connect(config: &DatabaseConfig) -> ApiResult<Self> {
        info!("Connecting to PostgreSQL at {}", config.redacted_url());

        let pool = PgPoolOptions::new()
            .min_connections(config.min_connections)
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout())
            .connect_lazy_with(connect_options(config)?);

        let pool = Self { pool };
        pool.wait_until_ready(config.connect_attempts, config.connect_retry_interval())
            .await?;

        info!("PostgreSQL connection pool established");
        Ok(pool)
    }

    /// Wraps an existing pool.
    #[must_use]
    pub fn with_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the underlying pool.
    #[must_use]
    pub fn inner(&self) -> &PgPool {
        &self.pool
    }

    /// Checks if the database connection is healthy.
    pub async fn ping(&self) -> ApiResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| ApiError::database(format!("Health check failed: {}", e)))?;
        Ok(())
    }

    /// Creates the `users` table if it does not exist.
    pub async fn ensure_schema(&self) -> ApiResult<()> {
        sqlx::raw_sql(crate::SCHEMA).execute(&self.pool).await?;
        debug!("Schema ensured");
        Ok(())
    }

    /// Closes the database pool.
    pub async fn close(&self) {
        info!("Closing database connection pool...");
        self.pool.close().await;
        info!("Database connection pool closed");
    }

    async fn wait_until_ready(&self, attempts: u32, interval: Duration) -> ApiResult<()> {
        let attempts = attempts.max(1);
        let mut attempt = 0;

        loop {
            attempt += 1;
            match self.ping().await {
                Ok(()) => return Ok(()),
                Err(e) if attempt >= attempts => {
                    return Err(ApiError::database(format!(
                        "Failed to connect after {} attempts: {}",
                        attempts, e
                    )));
                }
                Err(e) => {
                    warn!(attempt, attempts, error = %e, "Database not ready, retrying");
                    tokio::time::sleep(interval).await;
                }
            }
        }
    }
}

#[async_trait]
impl HealthCheck for DatabasePool {
    async fn health_check(&self) -> ApiResult<()> {
        self.ping().await
    }
}

impl std::ops::Deref for DatabasePool {
    type Target = PgPool;

    fn deref(&self) -> &Self::Target {
        &self.pool
    }
}

impl std::fmt::Debug for DatabasePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabasePool")
            .field("size", &self.pool.size())
            .field("num_idle", &self.pool.num_idle())
            .finish()
    }
}

/// Builds connection options from the discrete config fields.
pub fn connect_options(config: &DatabaseConfig) -> ApiResult<PgConnectOptions> {
    let ssl_mode = PgSslMode::from_str(&config.ssl_mode).map_err(|e| {
        ApiError::Configuration(format!("Invalid ssl mode '{}': {}", config.ssl_mode, e))
    })?;

    Ok(PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.user)
        .password(&config.password)
        .database(&config.name)
        .ssl_mode(ssl_mode))
}

/// Creates a shared database pool.
pub async fn create_pool(config: &DatabaseConfig) -> ApiResult<Arc<DatabasePool>> {
    let pool = DatabasePool::connect(config).await?;
    Ok(Arc::new(pool))
}
