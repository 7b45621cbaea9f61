//! # Roster Config
//!
//! Configuration management for Roster.
//! Supports layered configuration from files, a `.env` file, environment
//! variables, and runtime refresh.

mod app_config;
mod loader;
mod validation;

pub use app_config::*;
pub use loader::*;
pub use validation::*;
