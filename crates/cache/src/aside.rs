//! Cache-aside accessor.
//!
//! [`CacheAside::get_or_load`] reads a key, and on miss runs the caller's
//! loader, stores its result, and returns it together with a
//! [`CacheStatus`]. Cache failures never fail the call: they are logged,
//! counted in [`CacheStats`], and the loader result is served instead.
//!
//! Every store call is bounded by an operation timeout, so a backend that
//! accepts connections but stops answering degrades to a miss.
//!
//! There is no single-flight coordination. Concurrent misses on the same key
//! each run the loader and the last write wins.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::keys::Ttl;
use crate::store::{CacheError, CacheResult, CacheStore};

/// Default bound on a single cache store call.
pub const DEFAULT_OP_TIMEOUT: Duration = Duration::from_millis(500);

/// Whether a value came from the cache or from the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Miss,
}

impl CacheStatus {
    /// Value for the `X-Cache` response header.
    pub fn as_header_value(self) -> &'static str {
        match self {
            CacheStatus::Hit => "HIT",
            CacheStatus::Miss => "MISS",
        }
    }
}

/// Running counters for cache outcomes.
#[derive(Debug, Default)]
pub struct CacheStats {
    hits: AtomicU64,
    misses: AtomicU64,
    errors: AtomicU64,
}

/// Point-in-time copy of [`CacheStats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStatsSnapshot {
    pub hits: u64,
    pub misses: u64,
    pub errors: u64,
}

impl CacheStats {
    pub fn snapshot(&self) -> CacheStatsSnapshot {
        CacheStatsSnapshot {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            errors: self.errors.load(Ordering::Relaxed),
        }
    }

    fn hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    fn miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    fn error(&self) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }
}

/// Get-or-populate wrapper around a [`CacheStore`].
pub struct CacheAside {
    store: Arc<dyn CacheStore>,
    stats: CacheStats,
    op_timeout: Duration,
}

impl CacheAside {
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self {
            store,
            stats: CacheStats::default(),
            op_timeout: DEFAULT_OP_TIMEOUT,
        }
    }

    /// Override the per-call store timeout.
    pub fn with_op_timeout(mut self, op_timeout: Duration) -> Self {
        self.op_timeout = op_timeout;
        self
    }

    pub fn stats(&self) -> CacheStatsSnapshot {
        self.stats.snapshot()
    }

    pub fn backend(&self) -> &'static str {
        self.store.backend()
    }

    /// Return the cached value for `key`, or load, store, and return it.
    ///
    /// Loader errors are returned as-is and nothing is cached.
    pub async fn get_or_load<T, E, F, Fut>(
        &self,
        key: &str,
        ttl: Ttl,
        loader: F,
    ) -> Result<(T, CacheStatus), E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(value) = self.read::<T>(key).await {
            self.stats.hit();
            tracing::debug!(key, "Cache hit");
            return Ok((value, CacheStatus::Hit));
        }

        self.stats.miss();
        tracing::debug!(key, "Cache miss");
        let value = loader().await?;
        self.write(key, &value, ttl).await;
        Ok((value, CacheStatus::Miss))
    }

    /// Delete `keys`. Returns how many existed; failures count as zero.
    pub async fn invalidate(&self, keys: &[String]) -> u64 {
        match self.bounded(self.store.delete(keys)).await {
            Ok(removed) => {
                tracing::info!(?keys, removed, "Cache keys invalidated");
                removed
            }
            Err(e) => {
                self.stats.error();
                tracing::warn!(error = %e, ?keys, "Cache invalidation failed");
                0
            }
        }
    }

    /// Whether the backing store answers.
    pub async fn is_healthy(&self) -> bool {
        match self.bounded(self.store.ping()).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, backend = self.store.backend(), "Cache ping failed");
                false
            }
        }
    }

    async fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.bounded(self.store.get(key)).await {
            Ok(raw) => raw?,
            Err(e) => {
                self.stats.error();
                tracing::warn!(error = %e, key, "Cache read failed, falling through to loader");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                self.stats.error();
                tracing::warn!(error = %e, key, "Cached value could not be decoded, reloading");
                None
            }
        }
    }

    async fn write<T: Serialize>(&self, key: &str, value: &T, ttl: Ttl) {
        let serialized = match serde_json::to_string(value) {
            Ok(s) => s,
            Err(e) => {
                self.stats.error();
                tracing::warn!(error = %e, key, "Value could not be serialized for caching");
                return;
            }
        };

        if let Err(e) = self
            .bounded(self.store.set(key, serialized, ttl.as_duration()))
            .await
        {
            self.stats.error();
            tracing::warn!(error = %e, key, "Cache write failed");
        }
    }

    async fn bounded<T>(&self, op: impl Future<Output = CacheResult<T>>) -> CacheResult<T> {
        tokio::time::timeout(self.op_timeout, op)
            .await
            .unwrap_or(Err(CacheError::Timeout(self.op_timeout)))
    }
}
