//! # Roster Service
//!
//! The cache-aside user service: reads try Redis before PostgreSQL, writes
//! go to PostgreSQL and are mirrored into Redis in the background.

pub mod cache;
pub mod dto;
pub mod r#impl;
pub mod user_service;

pub use cache::*;
pub use dto::*;
pub use r#impl::UserServiceImpl;
pub use user_service::*;
