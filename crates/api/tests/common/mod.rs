#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use coopsite_api::config::ServerConfig;
use coopsite_api::router::build_app_router;
use coopsite_api::state::AppState;
use coopsite_cache::{CacheAside, MemoryStore, NullStore};
use http_body_util::BodyExt;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tower::ServiceExt;

/// Token accepted by `POST /api/v1/cache/invalidate` in tests.
pub const INVALIDATE_TOKEN: &str = "test-invalidate-token";

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        upload_dir: PathBuf::from("uploads"),
        max_file_bytes: coopsite_core::files::MAX_FILE_BYTES,
        cache_url: None,
        cache_invalidation_token: Some(INVALIDATE_TOKEN.to_string()),
    }
}

/// An in-memory cache, so HIT/MISS behaviour is observable.
pub fn memory_cache() -> Arc<CacheAside> {
    Arc::new(CacheAside::new(Arc::new(MemoryStore::new())))
}

/// A disabled cache: every read misses.
pub fn null_cache() -> Arc<CacheAside> {
    Arc::new(CacheAside::new(Arc::new(NullStore)))
}

/// A pool that never connects unless a query runs. For routes that do not
/// touch the database.
pub fn lazy_pool() -> PgPool {
    PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(std::time::Duration::from_secs(1))
        .connect_lazy("postgres://postgres@localhost:1/coopsite_unused")
        .unwrap()
}

/// Build the full application router with the production middleware stack.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, test_config(), memory_cache())
}

pub fn build_test_app_with(pool: PgPool, config: ServerConfig, cache: Arc<CacheAside>) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        cache,
    };
    build_app_router(state, &config).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send_json(app, Method::POST, uri, body, &[]).await
}

pub async fn send_json(
    app: Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
    headers: &[(&str, &str)],
) -> Response {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    app.oneshot(builder.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap()
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
