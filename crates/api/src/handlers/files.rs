//! Static file serving for the upload areas.
//!
//! Each [`FileArea`] is mounted at its route prefix and served from its own
//! subdirectory of `UPLOAD_DIR`. Requests pass through these checks, in
//! order, before any byte is read:
//!
//! 1. the raw path is validated as relative and free of `..` segments
//! 2. base and candidate are canonicalized (symlinks resolved)
//! 3. the canonical candidate must stay strictly inside the canonical base
//! 4. the extension must be on the area's allow-list
//! 5. the target must be a regular file within the size limit

use std::io::ErrorKind;
use std::path::Path;

use axum::body::Body;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path as UrlPath, State};
use axum::http::header::{CACHE_CONTROL, CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use coopsite_core::error::CoreError;
use coopsite_core::files::{
    check_extension, check_size, content_type_for, ensure_within, validate_relative_path,
    FileArea,
};
use tokio_util::io::ReaderStream;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// `Cache-Control` sent with every served file.
pub const FILE_CACHE_CONTROL: &str = "public, max-age=86400";

/// GET /{Area}/File/{*path}
pub async fn serve(
    area: FileArea,
    State(state): State<AppState>,
    path: Result<UrlPath<String>, PathRejection>,
) -> AppResult<Response> {
    let UrlPath(raw) = path?;
    let relative = validate_relative_path(&raw)?;

    let base_dir = state.config.upload_dir.join(area.directory());
    let base = tokio::fs::canonicalize(&base_dir).await.map_err(|e| {
        tracing::warn!(dir = %base_dir.display(), error = %e, "Upload directory is not available");
        CoreError::not_found("File", &raw)
    })?;

    let candidate = tokio::fs::canonicalize(base.join(&relative))
        .await
        .map_err(|e| io_error(e, &raw))?;

    if let Err(e) = ensure_within(&base, &candidate) {
        tracing::warn!(requested = %raw, area = ?area, "Resolved path escapes the upload area");
        return Err(e.into());
    }
    check_extension(&candidate, area)?;

    let metadata = tokio::fs::metadata(&candidate)
        .await
        .map_err(|e| io_error(e, &raw))?;
    if !metadata.is_file() {
        return Err(CoreError::not_found("File", &raw).into());
    }
    check_size(metadata.len(), state.config.max_file_bytes)?;

    let file = tokio::fs::File::open(&candidate)
        .await
        .map_err(|e| io_error(e, &raw))?;

    tracing::debug!(path = %candidate.display(), size = metadata.len(), "Serving file");

    Ok(file_response(&candidate, metadata.len(), Body::from_stream(ReaderStream::new(file))))
}

fn file_response(path: &Path, length: u64, body: Body) -> Response {
    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, content_type_for(path)),
            (CONTENT_LENGTH, length.to_string()),
            (CACHE_CONTROL, FILE_CACHE_CONTROL.to_string()),
        ],
        body,
    )
        .into_response()
}

fn io_error(err: std::io::Error, raw: &str) -> AppError {
    match err.kind() {
        ErrorKind::NotFound | ErrorKind::NotADirectory => CoreError::not_found("File", raw).into(),
        _ => AppError::InternalError(format!("Failed to read '{raw}': {err}")),
    }
}
