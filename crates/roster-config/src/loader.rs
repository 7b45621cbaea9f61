//! Configuration loader with layered sources.

use crate::{AppConfig, ConfigValidator};
use config::{Config, ConfigError, Environment, File};
use roster_core::ApiError;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Prefix of every environment variable the loader reads.
pub const ENV_PREFIX: &str = "ROSTER";

/// Configuration loader with runtime refresh support.
#[derive(Clone)]
pub struct ConfigLoader {
    config: Arc<RwLock<AppConfig>>,
    config_dir: String,
    env_prefix: String,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `.env` in the working directory, exported into the environment
    /// 2. `config/default.toml` - Default values
    /// 3. `config/{environment}.toml` - Environment-specific overrides
    /// 4. `config/local.toml` - Local overrides, not committed
    /// 5. Environment variables with `ROSTER_` prefix and `__` separator
    ///    (`ROSTER_DATABASE__HOST=db`)
    pub fn new(config_dir: impl Into<String>) -> Result<Self, ApiError> {
        Self::with_env_prefix(config_dir, ENV_PREFIX)
    }

    /// Same as [`ConfigLoader::new`] with a custom environment prefix.
    pub fn with_env_prefix(
        config_dir: impl Into<String>,
        env_prefix: impl Into<String>,
    ) -> Result<Self, ApiError> {
        let config_dir = config_dir.into();
        let env_prefix = env_prefix.into();
        let config = Self::load_config(&config_dir, &env_prefix)?;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            config_dir,
            env_prefix,
        })
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<Self, ApiError> {
        Self::new("./config")
    }

    /// Returns the current configuration.
    pub async fn get(&self) -> AppConfig {
        self.config.read().await.clone()
    }

    /// Reloads the configuration from disk and environment.
    ///
    /// On failure the previous configuration stays in place.
    pub async fn reload(&self) -> Result<(), ApiError> {
        let new_config = Self::load_config(&self.config_dir, &self.env_prefix)?;
        let mut config = self.config.write().await;
        *config = new_config;
        info!("Configuration reloaded successfully");
        Ok(())
    }

    fn load_config(config_dir: &str, env_prefix: &str) -> Result<AppConfig, ApiError> {
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let environment = std::env::var(format!("{}_ENVIRONMENT", env_prefix))
            .unwrap_or_else(|_| "development".to_string());

        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        for name in ["default", environment.as_str(), "local"] {
            let path = format!("{}/{}.toml", config_dir, name);
            if Path::new(&path).exists() {
                debug!("Loading config from: {}", path);
                builder = builder.add_source(File::with_name(&path).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix(env_prefix)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let mut app_config: AppConfig = builder
            .build()
            .and_then(|config| config.try_deserialize::<AppConfig>())
            .map_err(config_error_to_api_error)?;

        app_config.app.environment = environment;

        Self::validate_config(&app_config)?;

        Ok(app_config)
    }

    fn validate_config(config: &AppConfig) -> Result<(), ApiError> {
        if config.app.environment == "production" && config.database.password == "postgres" {
            warn!("Using the default database password in production");
        }

        ConfigValidator::validate(config).map_err(|errors| {
            let message = errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            ApiError::Configuration(message)
        })
    }
}

fn config_error_to_api_error(err: ConfigError) -> ApiError {
    ApiError::Configuration(err.to_string())
}
