//! # Roster Core
//!
//! Core types, domain model, and error definitions for Roster.
//! Every other crate in the workspace builds on the types defined here:
//! the [`User`] entity, the [`UserFilter`] search value object and the
//! unified [`ApiError`].

pub mod domain;
pub mod error;
pub mod filter;
pub mod id;
pub mod result;
pub mod validation;

pub use domain::*;
pub use error::*;
pub use filter::*;
pub use id::*;
pub use result::*;
pub use validation::*;
