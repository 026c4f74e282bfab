//! # Raster Encoder
//!
//! Turns an arbitrary RGBA bitmap into a printer-ready monochrome raster.
//!
//! ## Pipeline
//!
//! ```text
//! Bitmap ──scale──► width-aligned Bitmap ──trim──► content Bitmap ──binarize──► MonoRaster
//! ```
//!
//! - [`scale::scale_to_width`]: nearest-neighbor resample to the print
//!   width, aligned down to a multiple of 8 dots
//! - [`trim::trim_leading_blank_rows`]: drop empty rows at the top so blank
//!   captures don't feed paper
//! - [`binarize::binarize`]: luminance threshold into packed MSB-first bits
//!
//! All three are pure functions over plain byte buffers. A zero-area bitmap
//! anywhere in the chain short-circuits to an empty raster: "nothing to
//! print" is a normal outcome, not an error.
//!
//! ## Usage Example
//!
//! ```
//! use recibo::encoder::{self, Bitmap, EncodeOptions};
//!
//! let bitmap = Bitmap::from_rgba(100, 50, vec![0u8; 100 * 50 * 4]).unwrap();
//! let raster = encoder::encode(bitmap, &EncodeOptions::for_width(576));
//! assert_eq!(raster.width % 8, 0);
//! ```

pub mod binarize;
pub mod bitmap;
pub mod scale;
pub mod trim;

pub use binarize::{INK_THRESHOLD, MonoRaster, binarize};
pub use bitmap::{Bitmap, luminance};
pub use scale::{align_width, scale_to_width};
pub use trim::{BLANK_ROW_THRESHOLD, trim_leading_blank_rows};

/// Tuning knobs for the encode pipeline.
///
/// The two thresholds differ on purpose: row trimming only skips rows that
/// are near-white (250), while per-pixel binarization treats anything darker
/// than mid-gray (160) as ink.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EncodeOptions {
    /// Print width in dots; aligned down to a multiple of 8 before scaling.
    pub target_width: u32,
    /// Rows whose every pixel is at least this bright are trimmed.
    pub blank_threshold: f32,
    /// Pixels darker than this print.
    pub ink_threshold: f32,
}

impl EncodeOptions {
    /// Defaults for a given print width.
    pub fn for_width(target_width: u32) -> Self {
        Self {
            target_width,
            blank_threshold: BLANK_ROW_THRESHOLD,
            ink_threshold: INK_THRESHOLD,
        }
    }
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self::for_width(576)
    }
}

/// Run the full scale → trim → binarize pipeline.
pub fn encode(bitmap: Bitmap, options: &EncodeOptions) -> MonoRaster {
    if bitmap.is_empty() {
        return MonoRaster::empty();
    }
    let scaled = scale_to_width(bitmap, options.target_width);
    let trimmed = trim_leading_blank_rows(scaled, options.blank_threshold);
    binarize(&trimmed, options.ink_threshold)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_black_100x50_scales_to_576x288_all_ink() {
        // 100x50 all-black, target 576: scaled to 576x288, every byte 0xFF
        let bitmap = Bitmap::from_rgba(
            100,
            50,
            [0u8, 0, 0, 255]
                .iter()
                .copied()
                .cycle()
                .take(100 * 50 * 4)
                .collect(),
        )
        .unwrap();

        let raster = encode(bitmap, &EncodeOptions::for_width(576));
        assert_eq!(raster.width, 576);
        assert_eq!(raster.height, 288);
        assert_eq!(raster.bytes_per_row, 72);
        assert!(raster.data.iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn test_all_white_encodes_to_empty() {
        let bitmap = Bitmap::from_rgba(64, 32, vec![255u8; 64 * 32 * 4]).unwrap();
        let raster = encode(bitmap, &EncodeOptions::for_width(384));
        assert!(raster.is_empty());
    }

    #[test]
    fn test_zero_area_input() {
        let raster = encode(
            Bitmap::from_rgba(0, 0, vec![]).unwrap(),
            &EncodeOptions::default(),
        );
        assert!(raster.is_empty());
    }

    #[test]
    fn test_leading_blank_rows_removed_before_packing() {
        // 16x4: two white rows above two black rows
        let mut data = vec![255u8; 16 * 2 * 4];
        data.extend(
            [0u8, 0, 0, 255]
                .iter()
                .copied()
                .cycle()
                .take(16 * 2 * 4)
                .collect::<Vec<_>>(),
        );
        let bitmap = Bitmap::from_rgba(16, 4, data).unwrap();
        let raster = encode(bitmap, &EncodeOptions::for_width(16));
        assert_eq!(raster.height, 2);
        assert!(raster.data.iter().all(|&b| b == 0xFF));
    }
}
