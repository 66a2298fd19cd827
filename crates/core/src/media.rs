//! Media library rules: accepted mime types, upload limits and storage keys.

use crate::error::CoreError;

/// Default upload cap (20 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 20 * 1024 * 1024;

pub const MIME_JPEG: &str = "image/jpeg";
pub const MIME_PNG: &str = "image/png";
pub const MIME_WEBP: &str = "image/webp";
pub const MIME_GIF: &str = "image/gif";
pub const MIME_SVG: &str = "image/svg+xml";
pub const MIME_PDF: &str = "application/pdf";
pub const MIME_MP4: &str = "video/mp4";

/// Mime types the media library accepts.
pub const ALLOWED_MIME_TYPES: &[&str] = &[
    MIME_JPEG, MIME_PNG, MIME_WEBP, MIME_GIF, MIME_SVG, MIME_PDF, MIME_MP4,
];

/// Raster formats whose dimensions are read on upload.
const RASTER_MIME_TYPES: &[&str] = &[MIME_JPEG, MIME_PNG, MIME_WEBP, MIME_GIF];

/// Longest file name kept in a storage key.
const MAX_FILE_NAME_LENGTH: usize = 100;

pub fn validate_mime_type(mime: &str) -> Result<(), CoreError> {
    if ALLOWED_MIME_TYPES.contains(&mime) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Unsupported file type '{mime}'. Allowed: {}",
            ALLOWED_MIME_TYPES.join(", ")
        )))
    }
}

pub fn validate_upload_size(size: u64, max: u64) -> Result<(), CoreError> {
    if size == 0 {
        return Err(CoreError::Validation("Uploaded file is empty".to_string()));
    }
    if size > max {
        return Err(CoreError::Validation(format!(
            "File is {size} bytes; the limit is {max} bytes"
        )));
    }
    Ok(())
}

pub fn is_raster_image(mime: &str) -> bool {
    RASTER_MIME_TYPES.contains(&mime)
}

/// Guess a mime type from a file extension when the client sent none.
pub fn mime_from_file_name(name: &str) -> Option<&'static str> {
    let ext = name.rsplit_once('.')?.1.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some(MIME_JPEG),
        "png" => Some(MIME_PNG),
        "webp" => Some(MIME_WEBP),
        "gif" => Some(MIME_GIF),
        "svg" => Some(MIME_SVG),
        "pdf" => Some(MIME_PDF),
        "mp4" => Some(MIME_MP4),
        _ => None,
    }
}

/// Reduce a client-supplied file name to `[a-z0-9._-]`, keeping the extension.
pub fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let mut cleaned: String = base
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect();
    while cleaned.contains("..") {
        cleaned = cleaned.replace("..", ".");
    }
    while cleaned.contains("--") {
        cleaned = cleaned.replace("--", "-");
    }
    let cleaned = cleaned.trim_matches(|c| c == '.' || c == '-').to_string();
    let cleaned = if cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned
    };
    if cleaned.len() > MAX_FILE_NAME_LENGTH {
        cleaned[cleaned.len() - MAX_FILE_NAME_LENGTH..].to_string()
    } else {
        cleaned
    }
}

/// Storage key for an upload: `{yyyy}/{mm}/{unique}-{sanitized name}`.
///
/// `unique` must be collision-free (the caller passes a UUID).
pub fn storage_key(uploaded_at: chrono::DateTime<chrono::Utc>, unique: &str, file_name: &str) -> String {
    format!(
        "{}/{}-{}",
        uploaded_at.format("%Y/%m"),
        unique,
        sanitize_file_name(file_name)
    )
}

/// Whether a storage key is relative and free of traversal segments.
pub fn is_safe_storage_key(key: &str) -> bool {
    !key.is_empty()
        && !key.starts_with('/')
        && !key.contains('\\')
        && key.split('/').all(|seg| !seg.is_empty() && seg != "." && seg != "..")
}
