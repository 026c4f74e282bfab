//! # Printer Transport Layer
//!
//! This module provides communication backends for sending data to printers.
//!
//! ## Available Transports
//!
//! - [`tcp`]: raw TCP ("port 9100") printing for network thermal printers
//!
//! The transport is a plain owned value, not a global: whichever controller
//! (CLI command, server state) creates it holds the only socket, and
//! dropping it tears the connection down.

pub mod tcp;

pub use tcp::{ConnectionState, DEFAULT_PORT, Endpoint, TcpTransport};
