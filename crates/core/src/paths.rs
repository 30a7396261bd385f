//! Rewriting of stored file paths into public URL paths.
//!
//! Rows written by the administrative system carry whatever path the upload
//! tool produced at the time: bare filenames, `uploads/...` relative paths,
//! absolute server paths, even Windows paths. The public site only ever
//! exposes `<route prefix>/<basename>`.

use crate::files::FileArea;

/// Rewrite a stored path into the public route for `area`.
///
/// Returns `None` for missing, blank, or basename-less values. Data URIs
/// and absolute `http(s)` URLs pass through untouched, as do values that
/// are already public paths for the area, so applying this twice is a
/// no-op.
///
/// ```
/// use coopsite_core::files::FileArea;
/// use coopsite_core::paths::to_public_path;
///
/// assert_eq!(
///     to_public_path(Some("uploads/organizational/chair.jpg"), FileArea::Organizational),
///     Some("/Organizational/File/chair.jpg".to_string()),
/// );
/// assert_eq!(to_public_path(Some("  "), FileArea::Organizational), None);
/// ```
pub fn to_public_path(raw: Option<&str>, area: FileArea) -> Option<String> {
    let value = raw?.trim();
    if value.is_empty() {
        return None;
    }

    if is_passthrough(value) {
        return Some(value.to_string());
    }

    let normalized = value.replace('\\', "/");
    let prefix = area.route_prefix();
    if let Some(rest) = normalized.strip_prefix(prefix) {
        if rest.starts_with('/') && rest.len() > 1 {
            return Some(normalized);
        }
    }

    match basename(&normalized) {
        Some(name) => Some(format!("{prefix}/{name}")),
        None => {
            tracing::warn!(path = %value, area = ?area, "Stored path has no file name");
            None
        }
    }
}

/// Whether a stored value should be returned as-is.
fn is_passthrough(value: &str) -> bool {
    let lower = value.get(..8).unwrap_or(value).to_ascii_lowercase();
    lower.starts_with("data:") || lower.starts_with("http://") || lower.starts_with("https://")
}

/// Final path segment, ignoring any query string or fragment.
fn basename(path: &str) -> Option<&str> {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    let name = path.rsplit('/').next()?;
    if name.is_empty() || name == "." || name == ".." {
        None
    } else {
        Some(name)
    }
}
