//! Repository trait definitions.

use async_trait::async_trait;
use roster_core::{ApiResult, NewUser, User, UserFilter, UserId, UserUpdate};

/// User store.
///
/// "Not found" is never an error here: absent rows come back as `false`,
/// `None` or an empty list, and the caller decides what that means.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a user and returns the identifier the store assigned.
    async fn create(&self, user: &NewUser) -> ApiResult<UserId>;

    /// Deletes a user by ID. Returns `false` when no row matched.
    async fn delete(&self, id: UserId) -> ApiResult<bool>;

    /// Overwrites every mutable field of a user.
    ///
    /// Returns the stored record after the update, or `None` when no row
    /// matched.
    async fn update(&self, update: &UserUpdate) -> ApiResult<Option<User>>;

    /// Finds a user by ID.
    async fn find_by_id(&self, id: UserId) -> ApiResult<Option<User>>;

    /// Lists the users matching a filter.
    async fn search(&self, filter: &UserFilter) -> ApiResult<Vec<User>>;
}
