//! # Leading Blank-Row Trimming
//!
//! Captured views and decoded screenshots routinely carry a band of empty
//! white (or transparent) rows at the top. Printing them feeds blank paper,
//! so the encoder drops them before binarization.
//!
//! A row is blank when every pixel is either fully transparent or has a
//! luminance at or above the threshold. The default threshold of 250 is
//! near-white on purpose: trimming should only ever skip rows that are
//! unmistakably empty, which is a stricter standard than the mid-gray
//! threshold binarization uses for ink.

use super::bitmap::{Bitmap, luminance};

/// Default luminance threshold for treating a row as blank (near-white).
pub const BLANK_ROW_THRESHOLD: f32 = 250.0;

/// Drop every blank row above the first row containing visible content.
///
/// Returns the bitmap from the first non-blank row onward. If the whole
/// image is blank the result has height 0; callers treat that as "nothing
/// to print", not as an error. Applying the trim twice changes nothing.
pub fn trim_leading_blank_rows(src: Bitmap, threshold: f32) -> Bitmap {
    if src.is_empty() {
        return src;
    }

    let first_content = (0..src.height()).find(|&y| !row_is_blank(&src, y, threshold));

    match first_content {
        Some(0) => src,
        Some(y) => src.split_rows(y),
        None => {
            let h = src.height();
            src.split_rows(h)
        }
    }
}

/// True when no pixel in the row would print.
fn row_is_blank(bitmap: &Bitmap, y: u32, threshold: f32) -> bool {
    bitmap.row(y).chunks_exact(4).all(|px| {
        let [r, g, b, a] = [px[0], px[1], px[2], px[3]];
        a == 0 || luminance(r, g, b) >= threshold
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a bitmap from per-row (value, alpha) pairs, one pixel wide rows
    /// stretched to the given width.
    fn rows(width: u32, row_values: &[(u8, u8)]) -> Bitmap {
        let mut data = Vec::new();
        for &(v, a) in row_values {
            for _ in 0..width {
                data.extend_from_slice(&[v, v, v, a]);
            }
        }
        Bitmap::from_rgba(width, row_values.len() as u32, data).unwrap()
    }

    #[test]
    fn test_no_blank_rows_unchanged() {
        let src = rows(4, &[(0, 255), (0, 255)]);
        let expected = src.clone();
        assert_eq!(trim_leading_blank_rows(src, BLANK_ROW_THRESHOLD), expected);
    }

    #[test]
    fn test_white_rows_dropped() {
        let src = rows(4, &[(255, 255), (255, 255), (0, 255), (255, 255)]);
        let out = trim_leading_blank_rows(src, BLANK_ROW_THRESHOLD);
        // Two leading white rows go; the trailing white row stays
        assert_eq!(out.height(), 2);
        assert_eq!(out.pixel(0, 0)[0], 0);
    }

    #[test]
    fn test_transparent_rows_are_blank() {
        // A fully transparent black row counts as blank regardless of luminance
        let src = rows(4, &[(0, 0), (0, 255)]);
        let out = trim_leading_blank_rows(src, BLANK_ROW_THRESHOLD);
        assert_eq!(out.height(), 1);
    }

    #[test]
    fn test_all_white_yields_zero_height() {
        let src = rows(4, &[(255, 255), (254, 255), (250, 255)]);
        let out = trim_leading_blank_rows(src, BLANK_ROW_THRESHOLD);
        assert_eq!(out.height(), 0);
        assert!(out.is_empty());
    }

    #[test]
    fn test_idempotent() {
        let src = rows(4, &[(255, 255), (128, 255), (255, 255), (0, 255)]);
        let once = trim_leading_blank_rows(src, BLANK_ROW_THRESHOLD);
        let twice = trim_leading_blank_rows(once.clone(), BLANK_ROW_THRESHOLD);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_threshold_boundary() {
        // Luminance exactly at the threshold is blank (>=), just below is content
        let src = rows(4, &[(250, 255), (249, 255)]);
        let out = trim_leading_blank_rows(src, 250.0);
        assert_eq!(out.height(), 1);
    }

    #[test]
    fn test_single_dark_pixel_keeps_row() {
        let width = 8u32;
        let mut data = Vec::new();
        // Row 0: all white except one dark pixel at x=5
        for x in 0..width {
            let v = if x == 5 { 10 } else { 255 };
            data.extend_from_slice(&[v, v, v, 255]);
        }
        // Row 1: content
        for _ in 0..width {
            data.extend_from_slice(&[0, 0, 0, 255]);
        }
        let src = Bitmap::from_rgba(width, 2, data).unwrap();
        let out = trim_leading_blank_rows(src, BLANK_ROW_THRESHOLD);
        assert_eq!(out.height(), 2);
    }

    #[test]
    fn test_zero_area_passthrough() {
        let src = Bitmap::from_rgba(0, 0, vec![]).unwrap();
        assert!(trim_leading_blank_rows(src, BLANK_ROW_THRESHOLD).is_empty());
    }
}
