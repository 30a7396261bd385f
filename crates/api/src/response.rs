//! Shared response envelope types for API handlers.
//!
//! Every JSON response uses one of two shapes:
//!
//! ```text
//! { "success": true,  "data": ..., "message"?: ..., "timestamp": ..., [pagination] }
//! { "success": false, "error": ..., "code"?: ..., "details"?: ... }
//! ```
//!
//! The success shape is produced by [`ApiResponse`], the error shape by
//! [`ErrorEnvelope`] (via [`crate::error::AppError`]). Neither type can carry
//! the other's payload field.

use axum::http::header::{self, HeaderName, HeaderValue};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{SecondsFormat, Utc};
use coopsite_cache::{CacheStatus, Ttl};
use coopsite_core::pagination::PageMeta;
use serde::Serialize;

/// The `X-Cache` response header.
pub static X_CACHE: HeaderName = HeaderName::from_static("x-cache");

/// Success envelope.
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub timestamp: String,
    #[serde(flatten)]
    pub pagination: Option<PageMeta>,
}

/// Error envelope.
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorEnvelope {
    pub fn new(error: impl Into<String>, code: &'static str) -> Self {
        Self {
            success: false,
            error: error.into(),
            code: Some(code),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// A successful handler result: envelope, status, and cache headers.
///
/// # Example
///
/// ```ignore
/// let (members, status) = state.cache.get_or_load(key, Ttl::STABLE, loader).await?;
/// Ok(ApiResponse::cached(members, status, Ttl::STABLE))
/// ```
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    status: StatusCode,
    envelope: Envelope<T>,
    cache: Option<(CacheStatus, Ttl)>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 200 with an uncached payload.
    pub fn ok(data: T) -> Self {
        Self {
            status: StatusCode::OK,
            envelope: Envelope {
                success: true,
                data,
                message: None,
                timestamp: now_timestamp(),
                pagination: None,
            },
            cache: None,
        }
    }

    /// 201 for a newly recorded resource.
    pub fn created(data: T) -> Self {
        Self {
            status: StatusCode::CREATED,
            ..Self::ok(data)
        }
    }

    /// 200 with `X-Cache` and a public `Cache-Control` matching the TTL.
    pub fn cached(data: T, status: CacheStatus, ttl: Ttl) -> Self {
        Self {
            cache: Some((status, ttl)),
            ..Self::ok(data)
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.envelope.message = Some(message.into());
        self
    }

    pub fn with_pagination(mut self, meta: PageMeta) -> Self {
        self.envelope.pagination = Some(meta);
        self
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let mut response = (self.status, Json(self.envelope)).into_response();
        let headers = response.headers_mut();

        match self.cache {
            Some((status, ttl)) => {
                headers.insert(
                    X_CACHE.clone(),
                    HeaderValue::from_static(status.as_header_value()),
                );
                let cache_control = format!("public, max-age={}", ttl.as_secs());
                if let Ok(value) = HeaderValue::from_str(&cache_control) {
                    headers.insert(header::CACHE_CONTROL, value);
                }
            }
            None => {
                headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
            }
        }

        response
    }
}

/// Current UTC time as an RFC 3339 string with millisecond precision.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
