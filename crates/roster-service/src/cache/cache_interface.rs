//! Cache interface trait for abstracted caching operations.

use async_trait::async_trait;
use roster_core::ApiResult;
use std::time::Duration;

/// Hash-oriented cache capability.
///
/// Values are stored as JSON strings in named hashes. The TTL applies to
/// the whole hash, not to single fields. Uses raw strings to stay
/// dyn-compatible; see [`CacheExt`] for typed access.
#[async_trait]
pub trait CacheInterface: Send + Sync {
    /// Reads one field of a hash. `None` if the field or the hash is absent.
    async fn hget_raw(&self, hash: &str, field: &str) -> ApiResult<Option<String>>;

    /// Writes one field of a hash and resets the expiry of the whole hash.
    async fn hset_raw(&self, hash: &str, field: &str, value: &str, ttl: Duration) -> ApiResult<()>;

    /// Removes one field of a hash. Returns `true` if it existed.
    async fn hdel(&self, hash: &str, field: &str) -> ApiResult<bool>;

    /// Round-trips to the server.
    async fn ping(&self) -> ApiResult<()>;

    /// Check if caching is enabled.
    fn is_enabled(&self) -> bool;
}

/// Extension trait with typed methods for convenience.
#[async_trait]
pub trait CacheExt: CacheInterface {
    /// Reads and deserializes one field of a hash.
    async fn hget<T: serde::de::DeserializeOwned + Send>(
        &self,
        hash: &str,
        field: &str,
    ) -> ApiResult<Option<T>> {
        match self.hget_raw(hash, field).await? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Serializes and writes one field of a hash.
    async fn hset<T: serde::Serialize + Send + Sync>(
        &self,
        hash: &str,
        field: &str,
        value: &T,
        ttl: Duration,
    ) -> ApiResult<()> {
        let json = serde_json::to_string(value)?;
        self.hset_raw(hash, field, &json, ttl).await
    }
}

// Blanket implementation for all CacheInterface implementations
impl<T: CacheInterface + ?Sized> CacheExt for T {}
