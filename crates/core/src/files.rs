//! File-area definitions and path safety checks for the public file routes.
//!
//! Each [`FileArea`] owns a subdirectory of the upload root, a public route
//! prefix, and an extension allow-list. The checks here are pure; the HTTP
//! layer performs the actual filesystem canonicalization and streaming.

use std::path::{Component, Path, PathBuf};

use crate::error::CoreError;

/// Hard ceiling for a single served file (50 MiB).
pub const MAX_FILE_BYTES: u64 = 50 * 1024 * 1024;

/// Fallback content type when the extension is unknown.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

const DOCUMENT_AND_IMAGE_EXTENSIONS: &[&str] = &[
    "pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "jpg", "jpeg", "png", "gif", "webp",
];

/// A publicly served upload area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileArea {
    Organizational,
    DownloadForm,
    News,
    Album,
}

impl FileArea {
    pub const ALL: [FileArea; 4] = [
        FileArea::Organizational,
        FileArea::DownloadForm,
        FileArea::News,
        FileArea::Album,
    ];

    /// Public route prefix under which files of this area are served.
    pub fn route_prefix(self) -> &'static str {
        match self {
            FileArea::Organizational => "/Organizational/File",
            FileArea::DownloadForm => "/DownloadForm/File",
            FileArea::News => "/News/File",
            FileArea::Album => "/Album/File",
        }
    }

    /// Subdirectory of the upload root holding this area's files.
    pub fn directory(self) -> &'static str {
        match self {
            FileArea::Organizational => "organizational",
            FileArea::DownloadForm => "download_forms",
            FileArea::News => "news",
            FileArea::Album => "albums",
        }
    }

    /// Lowercase extensions this area is allowed to serve.
    pub fn allowed_extensions(self) -> &'static [&'static str] {
        match self {
            FileArea::DownloadForm => DOCUMENT_AND_IMAGE_EXTENSIONS,
            FileArea::Organizational | FileArea::News | FileArea::Album => IMAGE_EXTENSIONS,
        }
    }
}

/// Validate a caller-supplied relative path and return it normalized.
///
/// - empty, NUL-containing, absolute or drive-prefixed input is a
///   validation error (400)
/// - any `..` segment is a traversal attempt (403)
/// - `.` and empty segments are dropped, backslashes count as separators
pub fn validate_relative_path(raw: &str) -> Result<PathBuf, CoreError> {
    if raw.trim().is_empty() {
        return Err(CoreError::Validation("File path must not be empty".into()));
    }
    if raw.contains('\0') {
        return Err(CoreError::Validation("File path contains a NUL byte".into()));
    }

    let normalized = raw.replace('\\', "/");
    if normalized.starts_with('/') {
        return Err(CoreError::Validation("File path must be relative".into()));
    }

    let mut clean = PathBuf::new();
    for (index, segment) in normalized.split('/').enumerate() {
        match segment {
            "" | "." => continue,
            ".." => return Err(CoreError::PathTraversal(raw.to_string())),
            s if index == 0 && s.ends_with(':') => {
                return Err(CoreError::Validation("File path must be relative".into()));
            }
            s => clean.push(s),
        }
    }

    // Re-check with the platform's own component parsing.
    if clean
        .components()
        .any(|c| !matches!(c, Component::Normal(_)))
    {
        return Err(CoreError::PathTraversal(raw.to_string()));
    }
    if clean.as_os_str().is_empty() {
        return Err(CoreError::Validation("File path must name a file".into()));
    }

    Ok(clean)
}

/// Reject files whose extension is not on the area's allow-list.
pub fn check_extension(path: &Path, area: FileArea) -> Result<(), CoreError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    if area.allowed_extensions().contains(&ext.as_str()) {
        Ok(())
    } else {
        Err(CoreError::Forbidden(format!(
            "File type '.{ext}' is not served from {}",
            area.route_prefix()
        )))
    }
}

/// Ensure a canonicalized candidate path lies under the canonicalized base.
pub fn ensure_within(base: &Path, candidate: &Path) -> Result<(), CoreError> {
    if candidate.starts_with(base) && candidate != base {
        Ok(())
    } else {
        Err(CoreError::PathTraversal(candidate.display().to_string()))
    }
}

/// Reject files larger than `limit` bytes.
pub fn check_size(size: u64, limit: u64) -> Result<(), CoreError> {
    if size > limit {
        Err(CoreError::TooLarge { size, limit })
    } else {
        Ok(())
    }
}

/// Content type derived from the file extension.
pub fn content_type_for(path: &Path) -> String {
    mime_guess::from_path(path)
        .first()
        .map(|m| m.essence_str().to_string())
        .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string())
}
