//! PNG output for a rendered [`PixelCanvas`].
//!
//! Feature-gated behind `png` (default on) so the rasterizer itself carries no
//! `image` dependency.

use std::path::Path;

use force_fields_core::error::FieldError;

use crate::pixel::PixelCanvas;

/// Writes the canvas as an RGBA PNG.
///
/// Returns `FieldError::Io` on encode or write failure.
pub fn write_png(canvas: &PixelCanvas, path: &Path) -> Result<(), FieldError> {
    let img = image::RgbaImage::from_raw(canvas.width(), canvas.height(), canvas.as_rgba().to_vec())
        .ok_or_else(|| FieldError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| FieldError::Io(e.to_string()))?;
    tracing::info!(path = %path.display(), "wrote snapshot");
    Ok(())
}
