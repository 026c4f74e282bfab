//! # Recibo - ESC/POS Network Receipt Printing
//!
//! Recibo is a Rust library for printing images on thermal receipt printers
//! over raw TCP (port 9100). It provides:
//!
//! - **Raster encoding**: scaling, blank-row trimming, and threshold
//!   binarization of RGBA bitmaps into packed 1-bit rasters
//! - **Protocol implementation**: ESC/POS command builders and raster
//!   stripe framing
//! - **Transport**: a single-owner TCP connection with a tagged state
//!   machine and bounded connect timeout
//! - **Persistence**: printer endpoint and paper width remembered across
//!   launches
//!
//! ## Quick Start
//!
//! ```no_run
//! use recibo::{
//!     encoder::{self, Bitmap, EncodeOptions},
//!     printer::PaperWidth,
//!     protocol,
//!     transport::{Endpoint, TcpTransport},
//! };
//!
//! # async fn example() -> Result<(), recibo::ReciboError> {
//! // Decode an image into an RGBA bitmap
//! let bitmap = Bitmap::decode(&std::fs::read("receipt.png")?)?;
//!
//! // Scale to the paper width, trim blank rows, binarize
//! let width = PaperWidth::Mm80;
//! let raster = encoder::encode(bitmap, &EncodeOptions::for_width(width.dots() as u32));
//!
//! // Frame as an ESC/POS job and send it
//! let job = protocol::print_job(&raster);
//! let mut transport = TcpTransport::new();
//! transport.connect(Endpoint::new("192.168.1.50", 9100)?).await?;
//! transport.send(&job).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`encoder`] | Bitmap → monochrome raster pipeline |
//! | [`protocol`] | ESC/POS command builders and job framing |
//! | [`transport`] | TCP printer connection |
//! | [`printer`] | Paper widths and hardware profiles |
//! | [`settings`] | Persisted printer endpoint and width |
//! | [`preview`] | Raster → PNG rendering |
//! | [`server`] | HTTP print API |
//! | [`error`] | Error types |
//!
//! ## Supported Printers
//!
//! Any ESC/POS-compatible thermal printer reachable over TCP should work;
//! the two generic profiles cover 58 mm (384 dot) and 80 mm (576 dot)
//! mechanisms.

pub mod encoder;
pub mod error;
pub mod preview;
pub mod printer;
pub mod protocol;
pub mod server;
pub mod settings;
pub mod transport;

// Re-exports for convenience
pub use encoder::{Bitmap, MonoRaster};
pub use error::ReciboError;
pub use printer::PaperWidth;
pub use settings::Settings;
pub use transport::{Endpoint, TcpTransport};
