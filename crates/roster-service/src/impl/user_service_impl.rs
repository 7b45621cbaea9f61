//! Cache-aside user service implementation.

use crate::cache::{CacheMirror, UserCache};
use crate::dto::{CreateUserRequest, UpdateUserRequest, UserResponse};
use crate::user_service::UserService;
use async_trait::async_trait;
use roster_core::{ApiError, ApiResult, UserFilter, UserId, ValidateExt};
use roster_repository::UserRepository;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// User service combining the authoritative store with the Redis cache.
///
/// Reads go to the cache first and fall back to the store. Writes go to the
/// store; successful ones are mirrored into the cache on a detached task.
/// Searches always go to the store.
pub struct UserServiceImpl<R: UserRepository> {
    user_repository: Arc<R>,
    cache: UserCache,
    mirror: CacheMirror,
    populate_on_miss: bool,
}

impl<R: UserRepository> UserServiceImpl<R> {
    /// Creates a new user service.
    ///
    /// With `populate_on_miss`, records read from the store after a cache
    /// miss are written back into the cache (see [`CacheMirror::populate`]).
    pub fn new(user_repository: Arc<R>, cache: UserCache, populate_on_miss: bool) -> Self {
        let mirror = CacheMirror::new(cache.clone());
        Self {
            user_repository,
            cache,
            mirror,
            populate_on_miss,
        }
    }
}

#[async_trait]
impl<R: UserRepository + 'static> UserService for UserServiceImpl<R> {
    async fn create_user(&self, request: CreateUserRequest) -> ApiResult<UserResponse> {
        debug!("Creating user: {} {}", request.name, request.surname);

        request.validate_request()?;

        let draft = request.into_new_user()?;
        let id = self.user_repository.create(&draft).await?;
        let user = draft.into_user(id);

        drop(self.mirror.put(user.clone()));

        info!("User created: {}", id);
        Ok(UserResponse::from(user))
    }

    async fn get_user(&self, id: UserId) -> ApiResult<UserResponse> {
        debug!("Getting user: {}", id);

        match self.cache.get(id).await {
            Ok(Some(user)) => {
                debug!("Cache hit for user: {}", id);
                return Ok(UserResponse::from(user));
            }
            Ok(None) => debug!("Cache miss for user: {}", id),
            Err(e) => warn!(user_id = %id, error = %e, "Cache read failed, using store"),
        }

        let user = self
            .user_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::not_found("User", id))?;

        if self.populate_on_miss {
            drop(self.mirror.populate(user.clone(), Arc::clone(&self.user_repository)));
        }

        Ok(UserResponse::from(user))
    }

    async fn update_user(&self, request: UpdateUserRequest) -> ApiResult<UserResponse> {
        debug!("Updating user: {}", request.id);

        request.validate_request()?;

        let update = request.into_update()?;
        let user = self
            .user_repository
            .update(&update)
            .await?
            .ok_or_else(|| ApiError::not_found("User", update.id))?;

        drop(self.mirror.put(user.clone()));

        info!("User updated: {}", user.id);
        Ok(UserResponse::from(user))
    }

    async fn delete_user(&self, id: UserId) -> ApiResult<()> {
        debug!("Deleting user: {}", id);

        if !self.user_repository.delete(id).await? {
            return Err(ApiError::not_found("User", id));
        }

        drop(self.mirror.delete(id));

        info!("User deleted: {}", id);
        Ok(())
    }

    async fn search_users(&self, filter: UserFilter) -> ApiResult<Vec<UserResponse>> {
        debug!("Searching users: {:?}", filter);

        let users = self.user_repository.search(&filter).await?;
        if users.is_empty() {
            return Err(ApiError::NoMatches("users"));
        }

        Ok(users.into_iter().map(UserResponse::from).collect())
    }
}

impl<R: UserRepository> std::fmt::Debug for UserServiceImpl<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserServiceImpl")
            .field("cache", &self.cache)
            .field("populate_on_miss", &self.populate_on_miss)
            .finish_non_exhaustive()
    }
}
