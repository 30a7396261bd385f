use axum::extract::State;
use axum::routing::get;
use axum::Router;
use coopsite_cache::CacheStatsSnapshot;
use serde::Serialize;

use crate::response::ApiResponse;
use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok` when the database answers, `degraded` otherwise.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the database is reachable.
    pub db_healthy: bool,
    /// Whether the cache backend answers a ping.
    pub cache_healthy: bool,
    /// `redis` or `disabled`.
    pub cache_backend: &'static str,
    /// Hit, miss and error counters since startup.
    pub cache: CacheStatsSnapshot,
}

/// GET /health -- returns service, database and cache health.
///
/// An unreachable cache does not degrade the status: content is still
/// served straight from the database.
async fn health_check(State(state): State<AppState>) -> ApiResponse<HealthResponse> {
    let db_healthy = coopsite_db::health_check(&state.pool).await.is_ok();
    let cache_healthy = state.cache.is_healthy().await;

    let status = if db_healthy { "ok" } else { "degraded" };

    ApiResponse::ok(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        cache_healthy,
        cache_backend: state.cache.backend(),
        cache: state.cache.stats(),
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
