//! # Error Types
//!
//! This module defines error types used throughout the recibo library.
//!
//! Nothing here is fatal to a host application: every error is scoped to a
//! single connect or print attempt, and the printer link remains usable (or
//! cleanly disconnected) afterwards.

use thiserror::Error;

/// Main error type for recibo operations
#[derive(Debug, Error)]
pub enum ReciboError {
    /// Invalid user input (empty host, zero port, unknown paper width).
    /// Reported synchronously, never retried.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Connection-level errors (refused, reset, connect timeout)
    #[error("Connection error: {0}")]
    Connection(String),

    /// The operation requires a connected printer
    #[error("Printer is not connected")]
    NotConnected,

    /// Image decoding or raster encoding error
    #[error("Image error: {0}")]
    Image(String),

    /// Settings load/store error
    #[error("Config error: {0}")]
    Config(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
