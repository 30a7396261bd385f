use std::time::Duration;

use async_trait::async_trait;

/// Errors raised by a cache backend.
///
/// These never reach HTTP clients: [`crate::CacheAside`] logs them and falls
/// through to the source of truth.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache backend error: {0}")]
    Backend(String),

    #[error("Cache operation timed out after {0:?}")]
    Timeout(Duration),
}

impl From<redis::RedisError> for CacheError {
    fn from(err: redis::RedisError) -> Self {
        CacheError::Backend(err.to_string())
    }
}

pub type CacheResult<T> = Result<T, CacheError>;

/// A key-value store holding pre-serialized JSON strings with a TTL.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Read a value. `None` means "not cached" (absent or expired).
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Write a value that expires after `ttl`.
    async fn set(&self, key: &str, value: String, ttl: Duration) -> CacheResult<()>;

    /// Delete keys, returning how many existed.
    async fn delete(&self, keys: &[String]) -> CacheResult<u64>;

    /// Check that the backend is reachable.
    async fn ping(&self) -> CacheResult<()>;

    /// Short backend name for logs and health output.
    fn backend(&self) -> &'static str;
}
