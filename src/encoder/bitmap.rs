//! RGBA bitmap buffer.
//!
//! A [`Bitmap`] is the encoder's input: a width × height grid of 8-bit RGBA
//! pixels in one owned buffer. Bitmaps come from outside the encoder (a
//! decoded upload, a file, a fetched URL) and are immutable once built;
//! each pipeline stage consumes its input and returns a new bitmap.

use image::DynamicImage;

use crate::error::ReciboError;

/// Bytes per pixel (R, G, B, A).
pub const BYTES_PER_PIXEL: usize = 4;

/// An owned RGBA8 pixel grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Bitmap {
    /// Build a bitmap from a raw RGBA buffer.
    ///
    /// ## Errors
    ///
    /// Returns [`ReciboError::Image`] if the buffer length does not equal
    /// `width * height * 4`.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self, ReciboError> {
        let expected = width as usize * height as usize * BYTES_PER_PIXEL;
        if data.len() != expected {
            return Err(ReciboError::Image(format!(
                "RGBA buffer length mismatch: expected {} bytes for {}x{}, got {}",
                expected,
                width,
                height,
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// The zero-area bitmap.
    pub fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            data: Vec::new(),
        }
    }

    /// Decode an image from encoded bytes (PNG, JPEG, WebP, ...).
    pub fn decode(bytes: &[u8]) -> Result<Self, ReciboError> {
        let img = image::load_from_memory(bytes)
            .map_err(|e| ReciboError::Image(format!("Failed to decode image: {}", e)))?;
        Ok(Self::from_image(&img))
    }

    /// Convert a decoded [`DynamicImage`] into an RGBA bitmap.
    pub fn from_image(img: &DynamicImage) -> Self {
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self {
            width,
            height,
            data: rgba.into_raw(),
        }
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes, row-major.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// True if either dimension is zero. A zero-area bitmap means
    /// "nothing to print" everywhere in the pipeline, never an error.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Bytes in one pixel row.
    #[inline]
    pub fn row_bytes(&self) -> usize {
        self.width as usize * BYTES_PER_PIXEL
    }

    /// One pixel row as a slice of RGBA bytes.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        let start = y as usize * self.row_bytes();
        &self.data[start..start + self.row_bytes()]
    }

    /// The `[r, g, b, a]` values at (x, y).
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    /// Split off the pixel rows from `start_row` downward, consuming self.
    ///
    /// Used by blank-row trimming; the leading rows are discarded without
    /// copying the tail.
    pub(crate) fn split_rows(mut self, start_row: u32) -> Self {
        debug_assert!(start_row <= self.height);
        let byte_start = start_row as usize * self.row_bytes();
        let tail = self.data.split_off(byte_start);
        Self {
            width: self.width,
            height: self.height - start_row,
            data: tail,
        }
    }
}

/// Perceptual luminance of an RGB triple.
///
/// Uses the BT.601 weights `0.299 R + 0.587 G + 0.114 B`, returning a value
/// in `0.0..=255.0`. Alpha is not part of luminance; callers decide how
/// transparency maps to paper.
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> f32 {
    0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32
}

// ============================================================================
// TESTS
// ============================================================================
