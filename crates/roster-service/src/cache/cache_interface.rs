//! Cache interface trait for abstracted caching operations.

use roster_core::RosterResult;
use async_trait::async_trait;
use shaku::Interface;
use tracing::{debug, warn};

/// Cache interface for storing and retrieving cached data.
///
/// Uses JSON strings for type-erased storage to maintain dyn-compatibility.
/// Entry lifetime is a property of the cache, not of individual writes.
///
/// Every [`clear`](Self::clear) starts a new generation. A write tagged
/// with an older generation is dropped, so a value computed from data read
/// before a clear can never land after it.
#[async_trait]
pub trait CacheInterface: Interface + Send + Sync {
    /// Get a raw JSON value from the cache.
    ///
    /// Returns `None` if the key doesn't exist or has expired.
    async fn get_raw(&self, key: &str) -> RosterResult<Option<String>>;

    /// Returns the current generation.
    fn generation(&self) -> u64;

    /// Store a raw JSON value, replacing any previous entry for `key`.
    ///
    /// Returns `false` without storing anything when the cache was cleared
    /// after `generation` was read.
    async fn set_raw(&self, key: &str, value: &str, generation: u64) -> RosterResult<bool>;

    /// Remove every entry.
    ///
    /// Returns the number of entries dropped.
    async fn clear(&self) -> RosterResult<usize>;
}

/// Extension trait with typed methods for convenience.
///
/// This trait provides generic get/set methods that work with any serializable type.
#[async_trait]
pub trait CacheExt: CacheInterface {
    /// Get a typed value from the cache.
    async fn get<T: serde::de::DeserializeOwned + Send>(&self, key: &str) -> RosterResult<Option<T>> {
        match self.get_raw(key).await? {
            Some(json) => {
                let value: T = serde_json::from_str(&json)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Set a typed value in the cache if `generation` is still current.
    async fn set<T: serde::Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
        generation: u64,
    ) -> RosterResult<bool> {
        let json = serde_json::to_string(value)?;
        self.set_raw(key, &json, generation).await
    }

    /// Return the live cached value for `key`, or run `factory`, store its
    /// result and return it.
    ///
    /// The factory does not run on a hit. A factory error is returned as is
    /// and nothing is stored. Nor is a result whose computation overlapped
    /// a clear.
    async fn get_or_compute<T, F, Fut>(&self, key: &str, factory: F) -> RosterResult<T>
    where
        T: serde::Serialize + serde::de::DeserializeOwned + Send + Sync,
        F: FnOnce() -> Fut + Send,
        Fut: std::future::Future<Output = RosterResult<T>> + Send,
    {
        if let Some(cached) = self.get::<T>(key).await? {
            debug!(key, "Cache hit");
            return Ok(cached);
        }

        debug!(key, "Cache miss");
        let generation = self.generation();
        let value = factory().await?;

        // The computed value is still valid if it cannot be stored.
        match self.set(key, &value, generation).await {
            Ok(true) => {}
            Ok(false) => debug!(key, "Cache cleared during computation, result not stored"),
            Err(e) => warn!(key, error = %e, "Failed to store cache entry"),
        }

        Ok(value)
    }
}

// Blanket implementation for all CacheInterface implementations
impl<T: CacheInterface + ?Sized> CacheExt for T {}
