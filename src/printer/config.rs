//! # Printer Configuration
//!
//! Hardware profiles for the two common thermal receipt paper widths.
//!
//! | Paper | Print width (dots) | Bytes per row |
//! |-------|--------------------|---------------|
//! | 58 mm | 384                | 48            |
//! | 80 mm | 576                | 72            |
//!
//! ## Usage
//!
//! ```
//! use recibo::printer::PaperWidth;
//!
//! let paper = PaperWidth::Mm80;
//! assert_eq!(paper.dots(), 576);
//! assert_eq!(paper.bytes_per_row(), 72);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ReciboError;

/// Receipt paper width, expressed as the printable dot count.
///
/// Nearly every ESC/POS receipt printer is one of two mechanisms: 58 mm
/// paper printing 384 dots, or 80 mm paper printing 576 dots (both at
/// 203 DPI). The dot count is what the raster pipeline cares about; the
/// millimeter name is what appears on the box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaperWidth {
    /// 58 mm paper, 384 printable dots.
    Mm58,
    /// 80 mm paper, 576 printable dots.
    Mm80,
}

impl PaperWidth {
    /// Printable width in dots.
    #[inline]
    pub const fn dots(self) -> u16 {
        match self {
            Self::Mm58 => 384,
            Self::Mm80 => 576,
        }
    }

    /// Printable width in raster bytes (dots / 8).
    #[inline]
    pub const fn bytes_per_row(self) -> u16 {
        self.dots() / 8
    }

    /// Look up a paper width by its dot count.
    pub fn from_dots(dots: u16) -> Option<Self> {
        match dots {
            384 => Some(Self::Mm58),
            576 => Some(Self::Mm80),
            _ => None,
        }
    }
}

impl Default for PaperWidth {
    fn default() -> Self {
        Self::Mm80
    }
}

impl fmt::Display for PaperWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mm58 => write!(f, "58mm (384 dots)"),
            Self::Mm80 => write!(f, "80mm (576 dots)"),
        }
    }
}

impl FromStr for PaperWidth {
    type Err = ReciboError;

    /// Accepts a millimeter name (`"58"`, `"80"`, `"58mm"`, `"80mm"`) or a
    /// dot count (`"384"`, `"576"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "58" | "58mm" | "384" => Ok(Self::Mm58),
            "80" | "80mm" | "576" => Ok(Self::Mm80),
            other => Err(ReciboError::Validation(format!(
                "Unknown paper width '{}'. Use 58/80 (mm) or 384/576 (dots)",
                other
            ))),
        }
    }
}

/// Hardware profile for a print target.
#[derive(Debug, Clone, Copy)]
pub struct PrinterProfile {
    /// Human-readable name.
    pub name: &'static str,
    /// Paper width.
    pub paper: PaperWidth,
    /// Maximum rows per raster stripe.
    pub max_stripe_rows: u16,
}

impl PrinterProfile {
    /// Generic 58 mm ESC/POS printer.
    pub const GENERIC_58MM: Self = Self {
        name: "Generic 58mm ESC/POS",
        paper: PaperWidth::Mm58,
        max_stripe_rows: 96,
    };

    /// Generic 80 mm ESC/POS printer.
    pub const GENERIC_80MM: Self = Self {
        name: "Generic 80mm ESC/POS",
        paper: PaperWidth::Mm80,
        max_stripe_rows: 96,
    };

    /// Profile for a paper width.
    pub const fn for_paper(paper: PaperWidth) -> Self {
        match paper {
            PaperWidth::Mm58 => Self::GENERIC_58MM,
            PaperWidth::Mm80 => Self::GENERIC_80MM,
        }
    }

    /// Print width in dots.
    #[inline]
    pub const fn width_dots(&self) -> u16 {
        self.paper.dots()
    }
}

impl Default for PrinterProfile {
    fn default() -> Self {
        Self::GENERIC_80MM
    }
}

// ============================================================================
// TESTS
// ============================================================================
