//! # ESC/POS Raster Graphics
//!
//! Frames packed monochrome bits as `GS v 0` raster commands and assembles
//! complete print jobs.
//!
//! ## The Raster Command (GS v 0 m xL xH yL yH d1...dk)
//!
//! | Format  | Bytes |
//! |---------|-------|
//! | ASCII   | GS v 0 m xL xH yL yH d1...dk |
//! | Hex     | 1D 76 30 m xL xH yL yH d1...dk |
//! | Decimal | 29 118 48 m xL xH yL yH d1...dk |
//!
//! - `m`: scale mode (0 = normal, 1/2/3 = double width/height/both)
//! - `xL, xH`: bytes per row, little-endian u16
//! - `yL, yH`: row count, little-endian u16
//! - `d1...dk`: packed bits, k = bytes_per_row × rows, bit 7 = leftmost dot
//!
//! The header is exactly 8 bytes, so a frame's total length is always
//! `8 + bytes_per_row * rows`.
//!
//! ## Striping
//!
//! A full receipt image can run to hundreds of kilobytes; sending it as one
//! frame would balloon the printer's line buffer and the socket write. The
//! raster is instead cut into **stripes** of at most [`MAX_STRIPE_ROWS`]
//! rows. Raster mode advances the paper exactly as far as each stripe is
//! tall, so consecutive stripes butt together seamlessly.
//!
//! Non-final stripes are kept at a multiple of 8 rows (raster granularity);
//! the final stripe carries the exact remaining row count, which may be
//! smaller; the hardware accepts any trailing height, and inflating it
//! would print rows that do not exist.
//!
//! ```text
//! 200-row image, 96-row stripes:
//!   stripe 1: rows   0..96
//!   stripe 2: rows  96..192
//!   stripe 3: rows 192..200   (8 rows, exact remainder)
//! ```

use super::commands::{self, GS, u16_le};
use crate::encoder::MonoRaster;

/// Maximum rows per raster stripe.
///
/// Bounds both the memory a single frame occupies in the printer and the
/// size of one socket write. 96 rows at 80 mm width is 96 × 72 = 6912 data
/// bytes per stripe.
pub const MAX_STRIPE_ROWS: usize = 96;

/// Blank lines fed between the image and the cut so the tail clears the
/// print head.
pub const FEED_LINES_BEFORE_CUT: usize = 5;

/// Build one `GS v 0` raster frame.
///
/// `data` must hold exactly `bytes_per_row * rows` packed bytes.
///
/// ## Example
///
/// ```
/// use recibo::protocol::raster::raster_frame;
///
/// let frame = raster_frame(2, 1, &[0xFF, 0xF0]);
/// assert_eq!(frame, vec![0x1D, 0x76, 0x30, 0x00, 0x02, 0x00, 0x01, 0x00, 0xFF, 0xF0]);
/// assert_eq!(frame.len(), 8 + 2 * 1);
/// ```
pub fn raster_frame(bytes_per_row: u16, rows: u16, data: &[u8]) -> Vec<u8> {
    debug_assert!(
        data.len() == bytes_per_row as usize * rows as usize,
        "Raster data length mismatch. Expected {} ({} bytes × {} rows), got {}",
        bytes_per_row as usize * rows as usize,
        bytes_per_row,
        rows,
        data.len()
    );

    let [xl, xh] = u16_le(bytes_per_row);
    let [yl, yh] = u16_le(rows);

    let mut cmd = Vec::with_capacity(8 + data.len());
    cmd.push(GS);
    cmd.push(b'v');
    cmd.push(b'0');
    cmd.push(0); // m = 0 (normal scale)
    cmd.push(xl);
    cmd.push(xh);
    cmd.push(yl);
    cmd.push(yh);
    cmd.extend_from_slice(data);
    cmd
}

/// Split a row count into stripe heights.
///
/// Every stripe is at most `max_rows` tall. Non-final stripes use the
/// largest multiple of 8 that fits in `max_rows` (floored at 8 rows); the
/// final stripe is the exact remaining row count, never padded past the end
/// of the image.
pub fn stripe_heights(total_rows: usize, max_rows: usize) -> Vec<usize> {
    if total_rows == 0 {
        return Vec::new();
    }

    // Largest multiple of 8 within the cap; a cap under 8 still yields
    // 8-row stripes rather than zero-row frames.
    let full = (max_rows & !7).max(8);

    let mut heights = Vec::with_capacity(total_rows.div_ceil(full));
    let mut remaining = total_rows;
    while remaining > full {
        heights.push(full);
        remaining -= full;
    }
    heights.push(remaining);
    heights
}

/// Assemble a complete print job for a monochrome raster.
///
/// Layout: `ESC @` (initialize), `ESC a 0` (left align), one `GS v 0` frame
/// per stripe, then feed and partial cut. The whole job comes back as a
/// single buffer for the transport to hand to the socket in one logical
/// write; stripes from concurrent jobs never interleave.
///
/// An empty raster produces an empty job: nothing to print is a no-op, not
/// an error, and in particular it must not feed-and-cut blank paper.
pub fn print_job(raster: &MonoRaster) -> Vec<u8> {
    print_job_with_stripe_rows(raster, MAX_STRIPE_ROWS)
}

/// [`print_job`] with an explicit stripe cap (exposed for tests and tuning).
pub fn print_job_with_stripe_rows(raster: &MonoRaster, max_rows: usize) -> Vec<u8> {
    if raster.is_empty() {
        return Vec::new();
    }

    let bytes_per_row = raster.bytes_per_row;
    let heights = stripe_heights(raster.height as usize, max_rows);

    let mut job = Vec::with_capacity(
        raster.data.len() + heights.len() * 8 + 16, // frames + init/align/feed/cut
    );
    job.extend(commands::init());
    job.extend(commands::align_left());

    let mut row = 0usize;
    for h in heights {
        let start = row * bytes_per_row;
        let end = (row + h) * bytes_per_row;
        job.extend(raster_frame(
            bytes_per_row as u16,
            h as u16,
            &raster.data[start..end],
        ));
        row += h;
    }

    job.extend(commands::feed_lines(FEED_LINES_BEFORE_CUT));
    job.extend(commands::cut_partial());
    job
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn raster(width: u32, height: u32, fill: u8) -> MonoRaster {
        let bytes_per_row = (width as usize).div_ceil(8);
        MonoRaster {
            width,
            height,
            bytes_per_row,
            data: vec![fill; bytes_per_row * height as usize],
        }
    }

    #[test]
    fn test_frame_header() {
        let data = vec![0xAA; 72 * 100];
        let frame = raster_frame(72, 100, &data);

        assert_eq!(frame[0], 0x1D); // GS
        assert_eq!(frame[1], 0x76); // 'v'
        assert_eq!(frame[2], 0x30); // '0'
        assert_eq!(frame[3], 0); // m = normal
        assert_eq!(frame[4], 72); // xL
        assert_eq!(frame[5], 0); // xH
        assert_eq!(frame[6], 100); // yL
        assert_eq!(frame[7], 0); // yH
    }

    #[test]
    fn test_frame_length() {
        // 8 header bytes + payload, for any stripe shape
        for (bpr, rows) in [(1u16, 1u16), (48, 96), (72, 7), (72, 96)] {
            let data = vec![0x00; bpr as usize * rows as usize];
            let frame = raster_frame(bpr, rows, &data);
            assert_eq!(frame.len(), 8 + bpr as usize * rows as usize);
        }
    }

    #[test]
    fn test_frame_large_row_count_little_endian() {
        let data = vec![0xFF; 2 * 500];
        let frame = raster_frame(2, 500, &data);
        // 500 = 0x01F4 -> [0xF4, 0x01]
        assert_eq!(frame[6], 0xF4);
        assert_eq!(frame[7], 0x01);
    }

    #[test]
    fn test_frame_preserves_data() {
        let data: Vec<u8> = (0..72u32 * 50).map(|i| (i % 256) as u8).collect();
        let frame = raster_frame(72, 50, &data);
        assert_eq!(&frame[8..], &data[..]);
    }

    #[test]
    fn test_stripe_heights_200_rows() {
        // 200 rows at max 96: 96 + 96 + 8
        assert_eq!(stripe_heights(200, 96), vec![96, 96, 8]);
    }

    #[test]
    fn test_stripe_heights_exact_fit() {
        assert_eq!(stripe_heights(96, 96), vec![96]);
        assert_eq!(stripe_heights(288, 96), vec![96, 96, 96]);
    }

    #[test]
    fn test_stripe_heights_small_image() {
        assert_eq!(stripe_heights(1, 96), vec![1]);
        assert_eq!(stripe_heights(7, 96), vec![7]);
        assert_eq!(stripe_heights(95, 96), vec![95]);
    }

    #[test]
    fn test_stripe_final_remainder_not_inflated() {
        // 99 rows: one full stripe then a 3-row remainder, exactly
        assert_eq!(stripe_heights(99, 96), vec![96, 3]);
        let total: usize = stripe_heights(99, 96).iter().sum();
        assert_eq!(total, 99);
    }

    #[test]
    fn test_stripe_nonfinal_always_multiple_of_8() {
        for total in [1usize, 8, 97, 200, 1000, 65535] {
            for max in [8usize, 12, 96, 100] {
                let heights = stripe_heights(total, max);
                assert_eq!(heights.iter().sum::<usize>(), total);
                for &h in &heights[..heights.len() - 1] {
                    assert_eq!(h % 8, 0, "total={} max={}", total, max);
                }
            }
        }
    }

    #[test]
    fn test_stripe_cap_below_8_floors_to_8() {
        assert_eq!(stripe_heights(20, 5), vec![8, 8, 4]);
    }

    #[test]
    fn test_stripe_heights_zero() {
        assert!(stripe_heights(0, 96).is_empty());
    }

    #[test]
    fn test_print_job_small_image_bytes() {
        // 8x2 all black: one stripe, byte-exact job
        let job = print_job(&raster(8, 2, 0xFF));
        let expected: Vec<u8> = [
            &[0x1B, 0x40][..],                                     // ESC @
            &[0x1B, 0x61, 0x00][..],                               // ESC a 0
            &[0x1D, 0x76, 0x30, 0x00, 0x01, 0x00, 0x02, 0x00][..], // GS v 0 header
            &[0xFF, 0xFF][..],                                     // 2 rows of 1 byte
            &[0x0A, 0x0A, 0x0A, 0x0A, 0x0A][..],                   // feed
            &[0x1D, 0x56, 0x01][..],                               // GS V 1
        ]
        .concat();
        assert_eq!(job, expected);
    }

    #[test]
    fn test_print_job_stripe_count() {
        // 288 rows -> 3 frames; count GS v 0 headers
        let job = print_job(&raster(576, 288, 0x00));
        let frames = job
            .windows(3)
            .filter(|w| *w == [0x1D, 0x76, 0x30])
            .count();
        assert_eq!(frames, 3);
    }

    #[test]
    fn test_print_job_empty_raster() {
        assert!(print_job(&MonoRaster::empty()).is_empty());
    }

    #[test]
    fn test_print_job_total_length() {
        let r = raster(576, 200, 0x55);
        let job = print_job(&r);
        // init(2) + align(3) + 3 frames (8 header each) + data + feed(5) + cut(3)
        assert_eq!(job.len(), 2 + 3 + 3 * 8 + r.data.len() + 5 + 3);
    }
}
