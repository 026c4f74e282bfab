//! # Width Scaling
//!
//! Resamples a bitmap to the printer's print width.
//!
//! ## Why widths are aligned to 8
//!
//! Raster bytes address 8 horizontal dots each, so the hardware can only
//! print widths that are whole bytes. The requested target width is aligned
//! *down* to a multiple of 8 (`target & !7`) before scaling; every bitmap
//! leaving this module has `width % 8 == 0`.
//!
//! ## Resampling
//!
//! Nearest-neighbor lookup: for each destination pixel,
//! `src = floor(dst / scale)` clamped to the last valid source index. Height
//! follows the same uniform factor as width (rounded, minimum 1 row), so
//! aspect ratio is preserved. Receipts are binarized right after scaling,
//! so a fancier filter buys nothing here.

use rayon::prelude::*;

use super::bitmap::{BYTES_PER_PIXEL, Bitmap};

/// Align a width down to a whole number of raster bytes (multiple of 8 dots).
#[inline]
pub fn align_width(width: u32) -> u32 {
    width & !7
}

/// Scale a bitmap to the 8-aligned target width, preserving aspect ratio.
///
/// If the source width already equals the aligned target the bitmap is
/// returned unchanged; a scale factor of exactly 1 would only introduce
/// rounding noise. A zero-area source (or an aligned target of 0) yields a
/// zero-area bitmap.
pub fn scale_to_width(src: Bitmap, target_width: u32) -> Bitmap {
    let aligned = align_width(target_width);

    if src.width() == aligned {
        return src;
    }
    if src.is_empty() || aligned == 0 {
        return Bitmap::empty();
    }

    let scale = aligned as f32 / src.width() as f32;
    let new_height = ((src.height() as f32 * scale).round() as u32).max(1);

    let dst_row_bytes = aligned as usize * BYTES_PER_PIXEL;
    let mut data = vec![0u8; dst_row_bytes * new_height as usize];

    data.par_chunks_mut(dst_row_bytes)
        .enumerate()
        .for_each(|(dst_y, dst_row)| {
            let src_y = ((dst_y as f32 / scale) as u32).min(src.height() - 1);
            let src_row = src.row(src_y);
            for dst_x in 0..aligned as usize {
                let src_x = ((dst_x as f32 / scale) as usize).min(src.width() as usize - 1);
                let s = src_x * BYTES_PER_PIXEL;
                let d = dst_x * BYTES_PER_PIXEL;
                dst_row[d..d + BYTES_PER_PIXEL].copy_from_slice(&src_row[s..s + BYTES_PER_PIXEL]);
            }
        });

    Bitmap::from_rgba(aligned, new_height, data).expect("scaled buffer sized to dimensions")
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Bitmap {
        let data: Vec<u8> = rgba
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 4)
            .collect();
        Bitmap::from_rgba(width, height, data).unwrap()
    }

    #[test]
    fn test_align_width() {
        assert_eq!(align_width(576), 576);
        assert_eq!(align_width(577), 576);
        assert_eq!(align_width(583), 576);
        assert_eq!(align_width(7), 0);
        assert_eq!(align_width(8), 8);
        assert_eq!(align_width(0), 0);
    }

    #[test]
    fn test_output_width_always_multiple_of_8() {
        for (w, h) in [(1u32, 1u32), (3, 7), (100, 50), (576, 10), (999, 3)] {
            for target in [8u32, 100, 384, 576, 577] {
                let out = scale_to_width(solid(w, h, [0, 0, 0, 255]), target);
                assert_eq!(out.width() % 8, 0, "w={} target={}", w, target);
            }
        }
    }

    #[test]
    fn test_matching_width_returns_unchanged() {
        let src = solid(576, 10, [1, 2, 3, 255]);
        let expected = src.clone();
        // 580 aligns down to 576: already matching, no resample
        let out = scale_to_width(src, 580);
        assert_eq!(out, expected);
    }

    #[test]
    fn test_upscale_100_to_576() {
        // scale = 576/100 = 5.76, height 50 * 5.76 = 288
        let out = scale_to_width(solid(100, 50, [0, 0, 0, 255]), 576);
        assert_eq!(out.width(), 576);
        assert_eq!(out.height(), 288);
        assert!(out.data().chunks(4).all(|p| p == [0, 0, 0, 255]));
    }

    #[test]
    fn test_downscale() {
        // 1000 -> 384: scale 0.384, height 100 -> 38
        let out = scale_to_width(solid(1000, 100, [7, 7, 7, 255]), 384);
        assert_eq!(out.width(), 384);
        assert_eq!(out.height(), 38);
    }

    #[test]
    fn test_height_floor_of_one() {
        // Aggressive downscale of a 1-row image must not round height to 0
        let out = scale_to_width(solid(1000, 1, [0, 0, 0, 255]), 8);
        assert_eq!(out.height(), 1);
    }

    #[test]
    fn test_zero_area_short_circuits() {
        let out = scale_to_width(Bitmap::from_rgba(0, 0, vec![]).unwrap(), 576);
        assert!(out.is_empty());
        // Target too narrow for even one raster byte
        let out = scale_to_width(solid(100, 10, [0, 0, 0, 255]), 7);
        assert!(out.is_empty());
    }

    #[test]
    fn test_nearest_neighbor_preserves_halves() {
        // Left half black, right half white, doubled in width: halves stay halves
        let mut data = Vec::new();
        for x in 0..8u32 {
            let v = if x < 4 { 0 } else { 255 };
            data.extend_from_slice(&[v, v, v, 255]);
        }
        let src = Bitmap::from_rgba(8, 1, data).unwrap();
        let out = scale_to_width(src, 16);
        assert_eq!(out.width(), 16);
        for x in 0..16 {
            let expected = if x < 8 { 0 } else { 255 };
            assert_eq!(out.pixel(x, 0)[0], expected, "x={}", x);
        }
    }
}
