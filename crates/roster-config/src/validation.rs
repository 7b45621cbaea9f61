//! Configuration validation.
//!
//! Every problem is collected in one pass and reported together.

use crate::{AppConfig, DatabaseConfig, ObservabilityConfig, RedisConfig, ServerConfig};
use std::fmt;

/// Configuration validation error variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    /// Port number is invalid (0 cannot be bound or dialled).
    InvalidPort { name: String, value: u16 },
    /// A required string value is empty.
    MissingValue { name: String },
    /// Pool size configuration is invalid (min must be <= max, max >= 1).
    InvalidPoolSize { min: u32, max: u32 },
    /// A counter or duration that must be positive is zero.
    NonPositive { name: String },
    /// Unknown libpq ssl mode.
    InvalidSslMode { value: String },
    /// Log level is invalid.
    InvalidLogLevel { value: String },
    /// Log format is invalid.
    InvalidLogFormat { value: String },
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPort { name, value } => {
                write!(f, "Invalid port for {}: {} (must be 1-65535)", name, value)
            }
            Self::MissingValue { name } => write!(f, "{} must not be empty", name),
            Self::InvalidPoolSize { min, max } => write!(
                f,
                "Invalid pool size: min ({}) must not exceed max ({}) and max must be at least 1",
                min, max
            ),
            Self::NonPositive { name } => write!(f, "{} must be positive", name),
            Self::InvalidSslMode { value } => write!(
                f,
                "Invalid ssl mode: '{}' (valid: {})",
                value,
                ConfigValidator::SSL_MODES.join(", ")
            ),
            Self::InvalidLogLevel { value } => write!(
                f,
                "Invalid log level: '{}' (valid: trace, debug, info, warn, error)",
                value
            ),
            Self::InvalidLogFormat { value } => {
                write!(f, "Invalid log format: '{}' (valid: pretty, json)", value)
            }
        }
    }
}

impl std::error::Error for ConfigValidationError {}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Accepted `database.ssl_mode` values.
    pub const SSL_MODES: &'static [&'static str] =
        &["disable", "allow", "prefer", "require", "verify-ca", "verify-full"];
    const LOG_LEVELS: &'static [&'static str] = &["trace", "debug", "info", "warn", "error"];
    const LOG_FORMATS: &'static [&'static str] = &["pretty", "json"];

    /// Validates the entire application configuration.
    ///
    /// Returns Ok(()) if valid, or Err with all validation errors found.
    pub fn validate(config: &AppConfig) -> Result<(), Vec<ConfigValidationError>> {
        let mut errors = Vec::new();

        Self::validate_server(&config.server, &mut errors);
        Self::validate_database(&config.database, &mut errors);
        Self::validate_redis(&config.redis, &mut errors);
        Self::validate_observability(&config.observability, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_server(config: &ServerConfig, errors: &mut Vec<ConfigValidationError>) {
        if config.port == 0 {
            errors.push(ConfigValidationError::InvalidPort {
                name: "server.port".to_string(),
                value: 0,
            });
        }
        if config.request_timeout_secs == 0 {
            errors.push(ConfigValidationError::NonPositive {
                name: "server.request_timeout_secs".to_string(),
            });
        }
    }

    fn validate_database(config: &DatabaseConfig, errors: &mut Vec<ConfigValidationError>) {
        if config.host.trim().is_empty() {
            errors.push(ConfigValidationError::MissingValue {
                name: "database.host".to_string(),
            });
        }
        if config.name.trim().is_empty() {
            errors.push(ConfigValidationError::MissingValue {
                name: "database.name".to_string(),
            });
        }
        if config.port == 0 {
            errors.push(ConfigValidationError::InvalidPort {
                name: "database.port".to_string(),
                value: 0,
            });
        }
        if config.max_connections == 0 || config.min_connections > config.max_connections {
            errors.push(ConfigValidationError::InvalidPoolSize {
                min: config.min_connections,
                max: config.max_connections,
            });
        }
        if config.connect_attempts == 0 {
            errors.push(ConfigValidationError::NonPositive {
                name: "database.connect_attempts".to_string(),
            });
        }
        if !Self::SSL_MODES.contains(&config.ssl_mode.as_str()) {
            errors.push(ConfigValidationError::InvalidSslMode {
                value: config.ssl_mode.clone(),
            });
        }
    }

    fn validate_redis(config: &RedisConfig, errors: &mut Vec<ConfigValidationError>) {
        if !config.enabled {
            return;
        }

        if config.port == 0 {
            errors.push(ConfigValidationError::InvalidPort {
                name: "redis.port".to_string(),
                value: 0,
            });
        }
        if config.hash_key.trim().is_empty() {
            errors.push(ConfigValidationError::MissingValue {
                name: "redis.hash_key".to_string(),
            });
        }
        if config.ttl_secs == 0 {
            errors.push(ConfigValidationError::NonPositive {
                name: "redis.ttl_secs".to_string(),
            });
        }
        if config.pool_size == 0 {
            errors.push(ConfigValidationError::NonPositive {
                name: "redis.pool_size".to_string(),
            });
        }
    }

    fn validate_observability(config: &ObservabilityConfig, errors: &mut Vec<ConfigValidationError>) {
        let level = config.log_level.to_lowercase();
        if !Self::LOG_LEVELS.contains(&level.as_str()) {
            errors.push(ConfigValidationError::InvalidLogLevel {
                value: config.log_level.clone(),
            });
        }

        let format = config.log_format.to_lowercase();
        if !Self::LOG_FORMATS.contains(&format.as_str()) {
            errors.push(ConfigValidationError::InvalidLogFormat {
                value: config.log_format.clone(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ConfigValidator::validate(&AppConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = AppConfig::default();
        config.database.host = String::new();
        config.database.max_connections = 0;
        config.database.ssl_mode = "sometimes".to_string();
        config.observability.log_format = "xml".to_string();

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ConfigValidationError::MissingValue {
            name: "database.host".to_string()
        }));
        assert!(errors.contains(&ConfigValidationError::InvalidSslMode {
            value: "sometimes".to_string()
        }));
    }

    #[test]
    fn test_zero_connect_attempts_rejected() {
        let mut config = AppConfig::default();
        config.database.connect_attempts = 0;
        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ConfigValidationError::NonPositive {
                name: "database.connect_attempts".to_string()
            }]
        );
    }

    #[test]
    fn test_disabled_redis_is_not_checked() {
        let mut config = AppConfig::default();
        config.redis.enabled = false;
        config.redis.hash_key = String::new();
        config.redis.ttl_secs = 0;
        assert!(ConfigValidator::validate(&config).is_ok());

        config.redis.enabled = true;
        assert_eq!(ConfigValidator::validate(&config).unwrap_err().len(), 2);
    }

    #[test]
    fn test_error_display() {
        let err = ConfigValidationError::InvalidLogLevel {
            value: "loud".to_string(),
        };
        assert!(err.to_string().contains("loud"));
    }
}
