use std::time::Duration;

use async_trait::async_trait;

use crate::store::{CacheResult, CacheStore};

/// A [`CacheStore`] that stores nothing. Every read misses.
///
/// Selected when no cache endpoint is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullStore;

#[async_trait]
impl CacheStore for NullStore {
    async fn get(&self, _key: &str) -> CacheResult<Option<String>> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: String, _ttl: Duration) -> CacheResult<()> {
        Ok(())
    }

    async fn delete(&self, _keys: &[String]) -> CacheResult<u64> {
        Ok(0)
    }

    async fn ping(&self) -> CacheResult<()> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "disabled"
    }
}
