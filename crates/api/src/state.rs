use std::sync::Arc;

use coopsite_cache::CacheAside;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
/// Both the pool and the cache are built once in `main` and closed there on
/// shutdown.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: coopsite_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Cache-aside accessor shared by the content routes.
    pub cache: Arc<CacheAside>,
}
