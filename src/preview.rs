//! # Raster Preview
//!
//! Renders a packed monochrome raster back into a grayscale PNG: the
//! pixel-exact picture of what the paper will show. Used by the HTTP
//! preview endpoint and the CLI's `--png` output.

use std::io::Cursor;
use std::path::Path;

use image::{GrayImage, Luma};

use crate::encoder::MonoRaster;
use crate::error::ReciboError;

/// Unpack a raster into a grayscale image (black ink on white paper).
fn raster_to_image(raster: &MonoRaster) -> Result<GrayImage, ReciboError> {
    if raster.is_empty() {
        return Err(ReciboError::Image(
            "Nothing to preview: the encoded raster is blank".to_string(),
        ));
    }

    let mut img = GrayImage::new(raster.width, raster.height);
    for y in 0..raster.height {
        for x in 0..raster.width {
            let color = if raster.get(x, y) { 0u8 } else { 255u8 };
            img.put_pixel(x, y, Luma([color]));
        }
    }
    Ok(img)
}

/// Encode a raster as PNG bytes.
pub fn raster_to_png(raster: &MonoRaster) -> Result<Vec<u8>, ReciboError> {
    let img = raster_to_image(raster)?;
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .map_err(|e| ReciboError::Image(format!("Failed to encode preview PNG: {}", e)))?;
    Ok(bytes)
}

/// Save a raster as a PNG file.
pub fn save_png(path: &Path, raster: &MonoRaster) -> Result<(), ReciboError> {
    let img = raster_to_image(raster)?;
    img.save(path)
        .map_err(|e| ReciboError::Image(format!("Failed to save PNG: {}", e)))
}

// ============================================================================
// TESTS
// ============================================================================
