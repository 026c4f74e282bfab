//! Server state and configuration.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Instant;

use image::DynamicImage;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::settings::Settings;
use crate::transport::TcpTransport;

/// How long an uploaded image survives without being previewed or printed.
pub const SESSION_EXPIRATION_SECS: u64 = 15 * 60;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on (e.g., "0.0.0.0:8080")
    pub listen_addr: String,
    /// Where printer endpoint and paper width are persisted.
    pub settings_path: PathBuf,
}

/// An uploaded image waiting to be previewed or printed.
pub struct PrintSession {
    pub image: DynamicImage,
    pub last_accessed: Instant,
}

impl PrintSession {
    pub fn new(image: DynamicImage) -> Self {
        Self {
            image,
            last_accessed: Instant::now(),
        }
    }

    /// Keep the session alive.
    pub fn touch(&mut self) {
        self.last_accessed = Instant::now();
    }
}

/// Application state shared across handlers.
///
/// The transport lives behind one mutex: the server is the single owner of
/// the printer socket, and holding the lock across a send is what keeps two
/// print requests from interleaving on the wire.
pub struct AppState {
    pub config: ServerConfig,
    pub transport: Mutex<TcpTransport>,
    pub settings: Mutex<Settings>,
    pub sessions: RwLock<HashMap<Uuid, PrintSession>>,
}

impl AppState {
    pub fn new(config: ServerConfig, settings: Settings) -> Self {
        Self {
            config,
            transport: Mutex::new(TcpTransport::new()),
            settings: Mutex::new(settings),
            sessions: RwLock::new(HashMap::new()),
        }
    }
}
