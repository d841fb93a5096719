//! Media types for the accepted input formats.

use std::path::Path;

use image::ImageFormat;

use crate::error::{Result, TryOnError};

pub const ACCEPTED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "webp"];

fn is_accepted(format: ImageFormat) -> bool {
    matches!(format, ImageFormat::Png | ImageFormat::Jpeg | ImageFormat::WebP)
}

/// Resolve the image format of `path` from its extension.
pub fn accepted_format(path: &Path) -> Result<ImageFormat> {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .ok_or_else(|| {
            TryOnError::Encoding(format!("{} has no file extension", path.display()))
        })?;

    ImageFormat::from_extension(&ext)
        .filter(|format| is_accepted(*format))
        .ok_or_else(|| {
            TryOnError::Encoding(format!(
                "unsupported image type .{} (expected one of: {})",
                ext,
                ACCEPTED_EXTENSIONS.join(", ")
            ))
        })
}

pub fn mime_type_for_path(path: &Path) -> Result<&'static str> {
    Ok(accepted_format(path)?.to_mime_type())
}

/// Media type from the leading magic bytes, for sources that declare none.
pub fn sniff_mime_type(bytes: &[u8]) -> Option<&'static str> {
    image::guess_format(bytes)
        .ok()
        .filter(|format| is_accepted(*format))
        .map(|format| format.to_mime_type())
}
