//! Server startup utilities.

use roster_config::{AppConfig, ConfigLoader};
use roster_core::ApiResult;
use tracing::info;
use tracing_subscriber::{fmt::MakeWriter, EnvFilter};

/// Loads configuration from `config_dir` under a bootstrap subscriber.
///
/// The real subscriber depends on the loaded configuration, so anything the
/// loader logs goes to `log_writer` instead. `RUST_LOG` applies here too.
pub fn load_config<W>(config_dir: &str, log_writer: W) -> ApiResult<ConfigLoader>
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let bootstrap = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_writer(log_writer)
        .finish();

    tracing::subscriber::with_default(bootstrap, || ConfigLoader::new(config_dir))
}

/// Prints the startup banner.
pub fn print_banner() {
    info!(r#"
    ____             __
   / __ \____  _____/ /____  _____
  / /_/ / __ \/ ___/ __/ _ \/ ___/
 / _, _/ /_/ (__  ) /_/  __/ /
/_/ |_|\____/____/\__/\___/_/
    "#);
}

/// Prints server startup information.
pub fn print_startup_info(config: &AppConfig) {
    let separator = "=".repeat(60);
    let addr = config.server.addr();
    info!("{}", separator);
    info!("REST API:  http://{}", addr);
    info!("Health:    http://{}/health", addr);
    info!("API Docs:  http://{}/swagger-ui", addr);
    info!("Database:  {}", config.database.redacted_url());
    if config.redis.enabled {
        info!("Redis:     {}:{} (hash '{}')", config.redis.host, config.redis.port, config.redis.hash_key);
    } else {
        info!("Redis:     disabled");
    }
    info!("{}", separator);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_load_config_logs_reach_bootstrap_writer() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("default.toml"), "[server]\nport = 9300\n").unwrap();

        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let loader = load_config(dir.path().to_str().unwrap(), move || writer.clone()).unwrap();

        assert_eq!(loader.get().await.server.port, 9300);
        assert!(
            logs.contents().contains("Loading configuration for environment"),
            "captured: {}",
            logs.contents()
        );
    }

    #[test]
    fn test_load_config_error_is_returned() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("default.toml"), "[server]\nport = 0\n").unwrap();

        let result = load_config(dir.path().to_str().unwrap(), io::sink);
        assert!(result.is_err());
    }

    #[test]
    fn test_print_banner_does_not_panic() {
        let _ = tracing_subscriber::fmt::try_init();
        print_banner();
    }

    #[test]
    fn test_print_startup_info_does_not_panic() {
        let _ = tracing_subscriber::fmt::try_init();
        print_startup_info(&AppConfig::default());
    }

    #[test]
    fn test_print_startup_info_without_redis() {
        let _ = tracing_subscriber::fmt::try_init();
        let mut config = AppConfig::default();
        config.redis.enabled = false;
        print_startup_info(&config);
    }
}
