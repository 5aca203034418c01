//! Photo upload constraints and storage key naming.

use crate::error::CoreError;
use crate::types::DbId;

/// Default upload size limit (20 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Accepted image extensions with their canonical content type.
pub const SUPPORTED_IMAGE_TYPES: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("webp", "image/webp"),
    ("gif", "image/gif"),
];

/// Fallback display name when an upload has no usable filename.
const DEFAULT_PHOTO_NAME: &str = "Untitled photo";

/// Result of validating an upload: normalized extension and content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageKind {
    pub extension: &'static str,
    pub content_type: &'static str,
}

/// Lowercased extension of `filename`, if it has one.
pub fn extension_of(filename: &str) -> Option<String> {
    let (stem, ext) = filename.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Validate an uploaded image by filename, declared content type, and size.
///
/// The extension decides the stored content type. A declared content type
/// is only checked when it is present and not the generic
/// `application/octet-stream`.
pub fn validate_image_upload(
    filename: &str,
    declared_content_type: Option<&str>,
    size: usize,
    max_bytes: usize,
) -> Result<ImageKind, CoreError> {
    if size == 0 {
        return Err(CoreError::Validation("Uploaded file is empty".into()));
    }
    if size > max_bytes {
        return Err(CoreError::Validation(format!(
            "Uploaded file is {size} bytes, maximum is {max_bytes}"
        )));
    }

    let ext = extension_of(filename).unwrap_or_default();
    let (extension, content_type) = SUPPORTED_IMAGE_TYPES
        .iter()
        .copied()
        .find(|(e, _)| *e == ext)
        .ok_or_else(|| {
            CoreError::Validation(format!(
                "Unsupported image format '.{ext}'. Supported: .jpg, .jpeg, .png, .webp, .gif"
            ))
        })?;

    if let Some(declared) = declared_content_type {
        let declared = declared.trim().to_ascii_lowercase();
        if declared != "application/octet-stream" && declared != content_type {
            return Err(CoreError::Validation(format!(
                "Content type '{declared}' does not match file extension '.{extension}'"
            )));
        }
    }

    Ok(ImageKind {
        extension,
        content_type,
    })
}

/// Build a fresh storage key for a photo owned by `owner_id`.
///
/// UUIDv7 keeps keys unique and roughly time-ordered within an owner's
/// directory.
pub fn storage_key(owner_id: DbId, extension: &str) -> String {
    format!("photos/{owner_id}/{}.{extension}", uuid::Uuid::now_v7())
}

/// Derive a display name from an uploaded filename.
///
/// Strips any client-side directory components and the extension.
pub fn display_name_from_filename(filename: &str) -> String {
    let base = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename)
        .trim();
    let stem = match base.rsplit_once('.') {
        Some((stem, _)) if !stem.trim().is_empty() => stem.trim(),
        _ => base,
    };
    if stem.is_empty() {
        DEFAULT_PHOTO_NAME.to_string()
    } else {
        stem.to_string()
    }
}
