//! Detached cache writes.

use super::UserCache;
use roster_core::{User, UserId};
use roster_repository::UserRepository;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Propagates write results into the cache on background tasks.
///
/// Best-effort: no retry, no backoff, and no ordering between tasks for
/// the same id. The request that triggered a task never waits for it.
/// The handles are returned for tests; callers normally drop them.
#[derive(Clone, Debug)]
pub struct CacheMirror {
    cache: UserCache,
}

impl CacheMirror {
    #[must_use]
    pub fn new(cache: UserCache) -> Self {
        Self { cache }
    }

    /// Spawns a task that stores the user.
    pub fn put(&self, user: User) -> JoinHandle<()> {
        let cache = self.cache.clone();
        tokio::spawn(async move { cache.put(&user).await })
    }

    /// Spawns a task that evicts the user.
    pub fn delete(&self, id: UserId) -> JoinHandle<()> {
        let cache = self.cache.clone();
        tokio::spawn(async move { cache.delete(id).await })
    }

    /// Spawns a task that caches a record read from the store after a miss.
    ///
    /// A read can race a write of the same id, so once the entry is written
    /// the store is read again and the entry is evicted unless the store
    /// still holds exactly this record. A concurrent delete or update
    /// therefore never leaves the older copy behind.
    pub fn populate<R: UserRepository + 'static>(&self, user: User, store: Arc<R>) -> JoinHandle<()> {
        let cache = self.cache.clone();
        tokio::spawn(async move {
            let id = user.id;
            cache.put(&user).await;

            match store.find_by_id(id).await {
                Ok(Some(current)) if current == user => {}
                Ok(_) => {
                    debug!(user_id = %id, "User changed while populating the cache, evicting");
                    cache.delete(id).await;
                }
                Err(e) => {
                    warn!(user_id = %id, error = %e, "Could not re-check populated user, evicting");
                    cache.delete(id).await;
                }
            }
        })
    }
}
