//! User service trait definition.

use crate::dto::{CreateUserRequest, UpdateUserRequest, UserResponse};
use async_trait::async_trait;
use roster_core::{ApiResult, UserFilter, UserId};

/// User service trait.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Creates a new user.
    async fn create_user(&self, request: CreateUserRequest) -> ApiResult<UserResponse>;

    /// Gets a user by ID, from the cache when possible.
    async fn get_user(&self, id: UserId) -> ApiResult<UserResponse>;

    /// Overwrites a user.
    async fn update_user(&self, request: UpdateUserRequest) -> ApiResult<UserResponse>;

    /// Deletes a user.
    async fn delete_user(&self, id: UserId) -> ApiResult<()>;

    /// Lists users matching a filter. Never served from the cache.
    async fn search_users(&self, filter: UserFilter) -> ApiResult<Vec<UserResponse>>;
}
