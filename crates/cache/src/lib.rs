//! Cache layer: a pluggable key-value [`CacheStore`] and the
//! [`CacheAside`] get-or-populate accessor used by the content routes.

pub mod aside;
pub mod keys;
pub mod memory;
pub mod null_store;
pub mod redis_store;
pub mod store;

pub use aside::{CacheAside, CacheStats, CacheStatsSnapshot, CacheStatus};
pub use keys::{Namespace, Ttl};
pub use memory::{Clock, ManualClock, MemoryStore, SystemClock};
pub use null_store::NullStore;
pub use redis_store::RedisStore;
pub use store::{CacheError, CacheResult, CacheStore};
