//! Image decoding into [`PixelBuffer`]s.

use std::path::Path;

use anyhow::{Context, Result};
use cipher_qa_core::{ImageInfo, PixelBuffer};
use tracing::debug;

/// Decodes an encoded image (PNG, JPEG, ...) into RGBA samples.
///
/// # Errors
///
/// Returns an error if the format is unknown or the data is corrupt.
pub fn decode_image(bytes: &[u8]) -> Result<PixelBuffer> {
    let image = image::load_from_memory(bytes).context("Failed to decode image data")?;
    Ok(PixelBuffer::from(&image))
}

/// Loads and decodes an image file.
///
/// # Errors
///
/// Returns an error naming the path if the file cannot be opened or decoded.
pub fn load_image(path: &Path) -> Result<ImageInfo> {
    let image =
        image::open(path).with_context(|| format!("Failed to open image: {}", path.display()))?;
    let buffer = PixelBuffer::from(&image);
    debug!(
        "Decoded {} ({}x{})",
        path.display(),
        buffer.width(),
        buffer.height()
    );
    Ok(ImageInfo::new(path.to_string_lossy(), buffer))
}
