//! # Network Printer Transport (TCP)
//!
//! Owns a single raw TCP connection to an ESC/POS printer. Virtually every
//! network thermal printer accepts raw print data on port 9100 ("JetDirect"
//! printing): bytes written to the socket go straight to the print engine,
//! and nothing is read back.
//!
//! ## Connection States
//!
//! The link is a tagged state value, so "connected but no socket" is
//! unrepresentable:
//!
//! ```text
//! Disconnected ──connect()──► Connecting ──ok──► Connected(stream)
//!      ▲                          │                    │
//!      └────── error/timeout ─────┘                    │
//!      ◄── disconnect() / send failure / drop ─────────┘
//! ```
//!
//! Only one socket is ever held: a new connect drops any prior stream
//! before dialing, and a connect issued while another attempt is in flight
//! is rejected instead of racing two sockets. Dropping the transport closes
//! whatever is open, so teardown needs no explicit call on the owner's
//! exit path.
//!
//! ## Writes
//!
//! [`TcpTransport::send`] takes one fully assembled job buffer. Large jobs
//! are pushed to the socket in bounded chunks so a multi-hundred-kilobyte
//! raster never sits in a single oversized write, then flushed once. The
//! printer sends no acknowledgement; a send that returns `Ok` means the
//! bytes were handed to the TCP stack, not that paper moved. There is no
//! internal queue: callers await one send before issuing the next.

use std::fmt;
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tracing::{debug, info};

use crate::error::ReciboError;

/// Default raw-printing port.
pub const DEFAULT_PORT: u16 = 9100;

/// How long a connect attempt may take before it is abandoned.
pub const CONNECT_TIMEOUT: Duration = Duration::from_millis(8000);

/// Chunk size for large socket writes (bytes).
const CHUNK_SIZE: usize = 4096;

// ============================================================================
// ENDPOINT
// ============================================================================

/// A printer's TCP endpoint: host plus port.
///
/// Construction validates; an `Endpoint` that exists is dialable input.
/// Validation failures happen before any socket is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
}

impl Endpoint {
    /// Build an endpoint, rejecting an empty host or zero port.
    pub fn new(host: impl Into<String>, port: u16) -> Result<Self, ReciboError> {
        let host = host.into();
        if host.trim().is_empty() {
            return Err(ReciboError::Validation(
                "Printer host must not be empty".to_string(),
            ));
        }
        if port == 0 {
            return Err(ReciboError::Validation(
                "Printer port must not be zero".to_string(),
            ));
        }
        Ok(Self {
            host: host.trim().to_string(),
            port,
        })
    }

    /// Build an endpoint from user-entered strings (form fields, persisted
    /// settings, CLI flags).
    pub fn parse(host: &str, port: &str) -> Result<Self, ReciboError> {
        if port.trim().is_empty() {
            return Err(ReciboError::Validation(
                "Printer port must not be empty".to_string(),
            ));
        }
        let port: u16 = port
            .trim()
            .parse()
            .map_err(|_| ReciboError::Validation(format!("Invalid printer port '{}'", port)))?;
        Self::new(host, port)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

// ============================================================================
// CONNECTION STATE
// ============================================================================

/// Observable connection state, without the socket itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disconnected => write!(f, "disconnected"),
            Self::Connecting => write!(f, "connecting"),
            Self::Connected => write!(f, "connected"),
        }
    }
}

/// Internal state: the `Connected` arm owns the stream.
enum LinkState {
    Disconnected,
    Connecting,
    Connected { stream: TcpStream, endpoint: Endpoint },
}

// ============================================================================
// TRANSPORT
// ============================================================================

/// # TCP Printer Transport
///
/// ## Example
///
/// ```no_run
/// use recibo::transport::{Endpoint, TcpTransport};
///
/// # async fn example() -> Result<(), recibo::ReciboError> {
/// let mut transport = TcpTransport::new();
/// transport
///     .connect(Endpoint::new("192.168.1.50", 9100)?)
///     .await?;
/// transport.send(&[0x1B, 0x40]).await?;
/// transport.disconnect();
/// # Ok(())
/// # }
/// ```
pub struct TcpTransport {
    state: LinkState,
    connect_timeout: Duration,
    chunk_size: usize,
}

impl TcpTransport {
    /// A disconnected transport with the default 8-second connect timeout.
    pub fn new() -> Self {
        Self {
            state: LinkState::Disconnected,
            connect_timeout: CONNECT_TIMEOUT,
            chunk_size: CHUNK_SIZE,
        }
    }

    /// Override the connect timeout (tests use short ones).
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Current observable state.
    pub fn state(&self) -> ConnectionState {
        match self.state {
            LinkState::Disconnected => ConnectionState::Disconnected,
            LinkState::Connecting => ConnectionState::Connecting,
            LinkState::Connected { .. } => ConnectionState::Connected,
        }
    }

    /// True when a live socket is held.
    pub fn is_connected(&self) -> bool {
        matches!(self.state, LinkState::Connected { .. })
    }

    /// The endpoint of the live connection, if any.
    pub fn endpoint(&self) -> Option<&Endpoint> {
        match &self.state {
            LinkState::Connected { endpoint, .. } => Some(endpoint),
            _ => None,
        }
    }

    /// Open a connection to the printer.
    ///
    /// Any previously held socket is dropped before dialing, so two
    /// back-to-back connects leave exactly one live socket. The attempt
    /// races the connect timeout; on timeout or refusal the transport lands
    /// back in `Disconnected` with a [`ReciboError::Connection`].
    ///
    /// A connect while another attempt is still in flight (possible when a
    /// caller drops the first future and retries) is rejected rather than
    /// racing two sockets.
    pub async fn connect(&mut self, endpoint: Endpoint) -> Result<(), ReciboError> {
        if matches!(self.state, LinkState::Connecting) {
            return Err(ReciboError::Connection(
                "A connection attempt is already in progress".to_string(),
            ));
        }

        // Drop any prior socket before opening a new one.
        self.state = LinkState::Connecting;

        debug!(%endpoint, "connecting to printer");
        let attempt = tokio::time::timeout(
            self.connect_timeout,
            TcpStream::connect((endpoint.host.as_str(), endpoint.port)),
        )
        .await;

        match attempt {
            Ok(Ok(stream)) => {
                info!(%endpoint, "printer connected");
                self.state = LinkState::Connected { stream, endpoint };
                Ok(())
            }
            Ok(Err(e)) => {
                self.state = LinkState::Disconnected;
                Err(ReciboError::Connection(format!(
                    "Failed to connect to {}: {}",
                    endpoint, e
                )))
            }
            Err(_) => {
                self.state = LinkState::Disconnected;
                Err(ReciboError::Connection(format!(
                    "Connection to {} timed out after {:?}",
                    endpoint, self.connect_timeout
                )))
            }
        }
    }

    /// Write a fully assembled job to the printer.
    ///
    /// Requires `Connected`. The buffer is written in bounded chunks and
    /// flushed once; a failed write drops the socket and leaves the
    /// transport `Disconnected` so the dead connection cannot be reused.
    pub async fn send(&mut self, data: &[u8]) -> Result<(), ReciboError> {
        let LinkState::Connected { stream, endpoint } = &mut self.state else {
            return Err(ReciboError::NotConnected);
        };

        if data.is_empty() {
            return Ok(());
        }

        debug!(%endpoint, bytes = data.len(), "sending print job");
        let result = Self::write_chunked(stream, data, self.chunk_size).await;

        match result {
            Ok(()) => {
                info!(%endpoint, bytes = data.len(), "print job sent");
                Ok(())
            }
            Err(e) => {
                let endpoint = endpoint.clone();
                self.state = LinkState::Disconnected;
                Err(ReciboError::Connection(format!(
                    "Write to {} failed: {}",
                    endpoint, e
                )))
            }
        }
    }

    /// Close the connection. A no-op when already disconnected.
    pub fn disconnect(&mut self) {
        if let LinkState::Connected { endpoint, .. } = &self.state {
            info!(%endpoint, "printer disconnected");
        }
        self.state = LinkState::Disconnected;
    }

    async fn write_chunked(
        stream: &mut TcpStream,
        data: &[u8],
        chunk_size: usize,
    ) -> std::io::Result<()> {
        for chunk in data.chunks(chunk_size) {
            stream.write_all(chunk).await?;
        }
        stream.flush().await
    }
}

impl Default for TcpTransport {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_rejects_empty_host() {
        assert!(matches!(
            Endpoint::new("", 9100),
            Err(ReciboError::Validation(_))
        ));
        assert!(matches!(
            Endpoint::new("   ", 9100),
            Err(ReciboError::Validation(_))
        ));
    }

    #[test]
    fn test_endpoint_rejects_zero_port() {
        assert!(matches!(
            Endpoint::new("printer.local", 0),
            Err(ReciboError::Validation(_))
        ));
    }

    #[test]
    fn test_endpoint_parse() {
        let ep = Endpoint::parse(" 192.168.1.50 ", "9100").unwrap();
        assert_eq!(ep.host, "192.168.1.50");
        assert_eq!(ep.port, 9100);

        assert!(Endpoint::parse("host", "").is_err());
        assert!(Endpoint::parse("host", "abc").is_err());
        assert!(Endpoint::parse("host", "70000").is_err());
        assert!(Endpoint::parse("", "9100").is_err());
    }

    #[test]
    fn test_endpoint_display() {
        let ep = Endpoint::new("10.0.0.7", 9100).unwrap();
        assert_eq!(ep.to_string(), "10.0.0.7:9100");
    }

    #[test]
    fn test_new_transport_is_disconnected() {
        let transport = TcpTransport::new();
        assert_eq!(transport.state(), ConnectionState::Disconnected);
        assert!(!transport.is_connected());
        assert!(transport.endpoint().is_none());
    }

    #[test]
    fn test_state_display() {
        assert_eq!(ConnectionState::Disconnected.to_string(), "disconnected");
        assert_eq!(ConnectionState::Connecting.to_string(), "connecting");
        assert_eq!(ConnectionState::Connected.to_string(), "connected");
    }

    #[tokio::test]
    async fn test_send_without_connect_is_not_connected() {
        let mut transport = TcpTransport::new();
        let err = transport.send(&[0x1B, 0x40]).await.unwrap_err();
        assert!(matches!(err, ReciboError::NotConnected));
    }

    #[tokio::test]
    async fn test_connect_refused_returns_to_disconnected() {
        // Bind then drop a listener to get a port with nothing listening.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let mut transport = TcpTransport::new();
        let err = transport
            .connect(Endpoint::new("127.0.0.1", port).unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, ReciboError::Connection(_)));
        assert_eq!(transport.state(), ConnectionState::Disconnected);
    }

    #[tokio::test]
    async fn test_connect_and_disconnect() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        let mut transport = TcpTransport::new();
        transport
            .connect(Endpoint::new("127.0.0.1", port).unwrap())
            .await
            .unwrap();
        assert!(transport.is_connected());
        assert_eq!(transport.endpoint().unwrap().port, port);

        transport.disconnect();
        assert_eq!(transport.state(), ConnectionState::Disconnected);
        assert!(transport.endpoint().is_none());
    }
}
