//! Cache key generators for consistent key naming.

use roster_core::UserId;

/// Default name of the hash holding user records.
pub const USERS_HASH: &str = "users";

/// Field of the users hash holding one user, keyed by the decimal id.
#[must_use]
pub fn user_field(id: UserId) -> String {
    id.to_string()
}
