//! Application state for Axum handlers.

use roster_repository::HealthCheck;
use roster_service::{CacheInterface, UserService};
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserService>,
    /// Store probe behind `/ready`.
    pub database: Arc<dyn HealthCheck>,
    /// Reported by `/ready` but never decides readiness.
    pub cache: Arc<dyn CacheInterface>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(
        user_service: Arc<dyn UserService>,
        database: Arc<dyn HealthCheck>,
        cache: Arc<dyn CacheInterface>,
    ) -> Self {
        Self {
            user_service,
            database,
            cache,
        }
    }
}
