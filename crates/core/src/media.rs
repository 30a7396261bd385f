//! Inline base64 image handling.
//!
//! Some legacy news rows store the cover image itself in the column, either
//! as a `data:<mime>;base64,<payload>` URI or as bare base64. These helpers
//! detect and decode such values so they can be served as binary responses.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::CoreError;
use crate::files::DEFAULT_CONTENT_TYPE;

/// A decoded inline image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Whether a stored value looks like inline base64 data rather than a path.
///
/// Data URIs always qualify. Bare values qualify only when they decode and
/// the decoded bytes start with a known image signature, so an extensionless
/// path made of base64-alphabet characters stays a path.
pub fn is_inline_base64(value: &str) -> bool {
    let value = value.trim();
    if value.get(..5).is_some_and(|s| s.eq_ignore_ascii_case("data:")) {
        return true;
    }
    if value.len() < MIN_BARE_LEN || value.contains('.') || !value.bytes().all(is_base64_byte) {
        return false;
    }
    decode_inline_image(value).is_ok_and(|image| image.content_type != DEFAULT_CONTENT_TYPE)
}

const MIN_BARE_LEN: usize = 64;

fn is_base64_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'+' | b'/' | b'=' | b'\n' | b'\r')
}

/// Decode a data URI or bare base64 payload into bytes and a content type.
pub fn decode_inline_image(value: &str) -> Result<InlineImage, CoreError> {
    let value = value.trim();

    let (content_type, payload) = match value.get(..5) {
        Some(scheme) if scheme.eq_ignore_ascii_case("data:") => {
            let (header, payload) = value[5..].split_once(',').ok_or_else(|| {
                CoreError::Validation("Malformed data URI: missing ',' separator".into())
            })?;
            let mut parts = header.split(';');
            let mime = parts.next().unwrap_or_default().trim();
            if !parts.any(|p| p.trim().eq_ignore_ascii_case("base64")) {
                return Err(CoreError::Validation(
                    "Only base64-encoded data URIs are supported".into(),
                ));
            }
            let mime = if mime.is_empty() {
                DEFAULT_CONTENT_TYPE.to_string()
            } else {
                mime.to_ascii_lowercase()
            };
            (Some(mime), payload)
        }
        _ => (None, value),
    };

    let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| CoreError::Validation(format!("Invalid base64 image data: {e}")))?;

    let content_type = content_type.unwrap_or_else(|| sniff_image_type(&bytes).to_string());
    Ok(InlineImage {
        content_type,
        bytes,
    })
}

/// Guess an image content type from magic bytes.
fn sniff_image_type(bytes: &[u8]) -> &'static str {
    match bytes {
        [0xFF, 0xD8, 0xFF, ..] => "image/jpeg",
        [0x89, b'P', b'N', b'G', ..] => "image/png",
        [b'G', b'I', b'F', b'8', ..] => "image/gif",
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => "image/webp",
        _ => DEFAULT_CONTENT_TYPE,
    }
}
