//! Result type aliases for Roster.

use crate::ApiError;

/// A specialized `Result` type for Roster operations.
pub type ApiResult<T> = Result<T, ApiError>;
