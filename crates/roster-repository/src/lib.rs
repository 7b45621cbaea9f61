//! # Roster Repository
//!
//! The authoritative user store.
//!
//! ```text
//! UserServiceImpl<R: UserRepository>
//!   ↓  Arc<R>
//! PgUserRepository      (PostgreSQL / SQLx)
//!   ↓  Arc<DatabasePool>
//! PostgreSQL
//! ```
//!
//! With the `test-utils` feature, [`InMemoryUserRepository`] implements the
//! same trait over a `BTreeMap` and backs the service and HTTP tests.

#[cfg(any(test, feature = "test-utils"))]
pub mod memory;
pub mod pool;
pub mod postgres;
pub mod traits;

#[cfg(any(test, feature = "test-utils"))]
pub use memory::InMemoryUserRepository;
pub use pool::*;
pub use postgres::*;
pub use traits::*;

/// DDL for the `users` table, for test databases and local setups.
pub const SCHEMA: &str = include_str!("../sql/schema.sql");
