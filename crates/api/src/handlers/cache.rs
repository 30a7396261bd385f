//! Handler for operator-triggered cache invalidation.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderName};
use axum::Json;
use coopsite_cache::Namespace;
use coopsite_core::error::CoreError;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Header carrying the shared invalidation secret.
pub static X_INVALIDATE_TOKEN: HeaderName = HeaderName::from_static("x-invalidate-token");

#[derive(Debug, Deserialize)]
pub struct InvalidateRequest {
    pub namespace: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct InvalidateResult {
    pub namespace: &'static str,
    pub keys: Vec<String>,
    pub removed: u64,
}

/// POST /api/v1/cache/invalidate
///
/// Drop the fixed keys of one namespace. Requires `X-Invalidate-Token` to
/// match `CACHE_INVALIDATION_TOKEN`; with no token configured the route
/// always answers 403.
pub async fn invalidate(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<InvalidateRequest>, JsonRejection>,
) -> AppResult<ApiResponse<InvalidateResult>> {
    authorize(&headers, state.config.cache_invalidation_token.as_deref())?;

    let Json(body) = body?;
    let name = body
        .namespace
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| CoreError::invalid_field("namespace", "namespace is required"))?;
    let namespace = Namespace::parse(name).ok_or_else(|| {
        CoreError::invalid_field("namespace", format!("Unknown cache namespace '{name}'"))
    })?;

    let keys = namespace.keys();
    let removed = state.cache.invalidate(&keys).await;

    Ok(ApiResponse::ok(InvalidateResult {
        namespace: namespace.name(),
        keys,
        removed,
    }))
}

fn authorize(headers: &HeaderMap, expected: Option<&str>) -> Result<(), CoreError> {
    let Some(expected) = expected else {
        return Err(CoreError::Forbidden(
            "Cache invalidation is disabled".into(),
        ));
    };

    let supplied = headers
        .get(&X_INVALIDATE_TOKEN)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if constant_time_eq(supplied.as_bytes(), expected.as_bytes()) {
        Ok(())
    } else {
        Err(CoreError::Forbidden("Invalid invalidation token".into()))
    }
}

/// Byte comparison whose running time does not depend on where the inputs
/// first differ.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
