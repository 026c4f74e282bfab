//! # ESC/POS Control Commands
//!
//! This module implements the ESC/POS command subset used by generic network
//! thermal receipt printers (Epson TM series and the many compatibles that
//! speak the same protocol on TCP port 9100).
//!
//! ## Protocol Overview
//!
//! ESC/POS commands are byte sequences prefixed by an escape character:
//!
//! - Single byte: `LF`
//! - Two bytes: `ESC @`
//! - Multi-byte with parameters: `ESC a n`, `GS V m`, `GS v 0 ...`
//!
//! ## Byte Order
//!
//! Multi-byte integers use **little-endian** encoding:
//! - `u16` value 0x0240 (576) is sent as bytes `[0x40, 0x02]`
//!
//! ## Reference
//!
//! Based on the Epson "ESC/POS Application Programming Guide".

// ============================================================================
// ESCAPE SEQUENCE CONSTANTS
// ============================================================================

/// ESC (Escape) - Command prefix byte
///
/// Most ESC/POS commands begin with ESC (0x1B). This byte signals the start
/// of a control sequence rather than printable text.
pub const ESC: u8 = 0x1B;

/// GS (Group Separator) - Extended command prefix
///
/// Prefixes graphics and cutter commands. Hex: 0x1D, Decimal: 29.
pub const GS: u8 = 0x1D;

/// LF (Line Feed) - Print and advance one line
///
/// Prints any data in the line buffer and advances paper by the current
/// line spacing amount.
pub const LF: u8 = 0x0A;

// ============================================================================
// INITIALIZATION
// ============================================================================

/// # Initialize Printer (ESC @)
///
/// Resets the printer to its power-on default state. Sent at the start of
/// each print job so earlier jobs cannot leak formatting state into this one.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC @ |
/// | Hex     | 1B 40 |
/// | Decimal | 27 64 |
///
/// ## Example
///
/// ```
/// use recibo::protocol::commands;
///
/// assert_eq!(commands::init(), vec![0x1B, 0x40]);
/// ```
#[inline]
pub fn init() -> Vec<u8> {
    vec![ESC, b'@']
}

// ============================================================================
// ALIGNMENT
// ============================================================================

/// # Select Justification (ESC a n)
///
/// Sets the horizontal alignment for everything that follows, including
/// raster graphics narrower than the print width.
///
/// ## Protocol Details
///
/// | Format  | Bytes   |
/// |---------|---------|
/// | ASCII   | ESC a n |
/// | Hex     | 1B 61 n |
/// | Decimal | 27 97 n |
///
/// ## Parameters
///
/// - `n`: 0 = left, 1 = center, 2 = right
#[inline]
pub fn align(n: u8) -> Vec<u8> {
    vec![ESC, b'a', n]
}

/// Left justification (ESC a 0). Raster jobs are emitted at full print
/// width, so left alignment keeps the hardware from shifting stripes.
#[inline]
pub fn align_left() -> Vec<u8> {
    align(0)
}

/// Center justification (ESC a 1)
#[inline]
pub fn align_center() -> Vec<u8> {
    align(1)
}

/// Right justification (ESC a 2)
#[inline]
pub fn align_right() -> Vec<u8> {
    align(2)
}

// ============================================================================
// FEED AND CUT
// ============================================================================

/// Feed `n` blank lines (n × LF).
///
/// The cutter sits above the print head, so a job must feed a few lines
/// before cutting or the tail of the image stays inside the mechanism.
#[inline]
pub fn feed_lines(n: usize) -> Vec<u8> {
    vec![LF; n]
}

/// # Full Cut (GS V 0)
///
/// | Format  | Bytes    |
/// |---------|----------|
/// | ASCII   | GS V 0   |
/// | Hex     | 1D 56 00 |
/// | Decimal | 29 86 0  |
#[inline]
pub fn cut_full() -> Vec<u8> {
    vec![GS, b'V', 0]
}

/// # Partial Cut (GS V 1)
///
/// Leaves a small "hinge" connecting the receipt to the roll, making it easy
/// to tear off while keeping the receipt from falling.
///
/// | Format  | Bytes    |
/// |---------|----------|
/// | ASCII   | GS V 1   |
/// | Hex     | 1D 56 01 |
/// | Decimal | 29 86 1  |
#[inline]
pub fn cut_partial() -> Vec<u8> {
    vec![GS, b'V', 1]
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Encode a u16 value as little-endian bytes [low, high]
///
/// ESC/POS uses little-endian encoding for all multi-byte integers.
///
/// ## Example
///
/// ```
/// use recibo::protocol::commands::u16_le;
///
/// assert_eq!(u16_le(0x1234), [0x34, 0x12]);
/// assert_eq!(u16_le(576), [0x40, 0x02]); // 576 = 0x0240
/// ```
#[inline]
pub const fn u16_le(value: u16) -> [u8; 2] {
    [value as u8, (value >> 8) as u8]
}

// ============================================================================
// TESTS
// ============================================================================
