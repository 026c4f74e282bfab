//! # HTTP Print API
//!
//! A small JSON API around the printer link and the raster pipeline: connect
//! and remember a printer, pick the paper width, upload an image, preview
//! the dithered result, print it.
//!
//! ## Usage
//!
//! ```bash
//! recibo serve --listen 0.0.0.0:8080
//! ```
//!
//! ## Endpoints
//!
//! | Method | Path | Purpose |
//! |--------|------|---------|
//! | POST | `/api/printer/connect` | connect `{host, port}`, persist on success |
//! | POST | `/api/printer/disconnect` | drop the connection |
//! | GET  | `/api/printer/status` | connection state, endpoint, paper width |
//! | PUT  | `/api/printer/width` | set + persist paper width |
//! | POST | `/api/print/upload` | multipart image upload → session id |
//! | GET  | `/api/print/{id}/preview` | PNG preview of the encoded raster |
//! | POST | `/api/print/{id}/print` | encode and send to the printer |
//!
//! On startup the server reads persisted settings and, if a printer is
//! remembered, makes one silent reconnect attempt. A failure is logged and
//! the server keeps serving, because auto-reconnect is a convenience, not
//! something a user asked for.

mod handlers;
pub(crate) mod state;

pub use state::ServerConfig;

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use crate::error::ReciboError;
use crate::settings::Settings;
use state::{AppState, SESSION_EXPIRATION_SECS};

/// Start the HTTP server.
///
/// ## Example
///
/// ```no_run
/// use recibo::server::{serve, ServerConfig};
/// use recibo::settings::Settings;
///
/// # async fn example() -> Result<(), recibo::ReciboError> {
/// let config = ServerConfig {
///     listen_addr: "0.0.0.0:8080".to_string(),
///     settings_path: Settings::default_path(),
/// };
/// serve(config).await?;
/// # Ok(())
/// # }
/// ```
pub async fn serve(config: ServerConfig) -> Result<(), ReciboError> {
    let settings = Settings::load(&config.settings_path)?;
    let app_state = Arc::new(AppState::new(config.clone(), settings));

    reconnect_persisted(&app_state).await;

    // Expired uploads are also swept in the background, not only on upload
    tokio::spawn(cleanup_sessions(app_state.clone()));

    let app = Router::new()
        .route("/api/printer/connect", post(handlers::printer::connect))
        .route(
            "/api/printer/disconnect",
            post(handlers::printer::disconnect),
        )
        .route("/api/printer/status", get(handlers::printer::status))
        .route("/api/printer/width", put(handlers::printer::set_width))
        // 50MB limit for uploads
        .route(
            "/api/print/upload",
            post(handlers::print::upload).layer(DefaultBodyLimit::max(50 * 1024 * 1024)),
        )
        .route("/api/print/:id/preview", get(handlers::print::preview_png))
        .route("/api/print/:id/print", post(handlers::print::print))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    info!(listen = %config.listen_addr, "recibo HTTP server starting");

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .map_err(|e| {
            ReciboError::Connection(format!("Failed to bind to {}: {}", config.listen_addr, e))
        })?;

    axum::serve(listener, app)
        .await
        .map_err(|e| ReciboError::Connection(format!("Server error: {}", e)))?;

    Ok(())
}

/// One silent reconnect attempt to the persisted printer.
///
/// Failures are logged, never surfaced: nobody asked for this connect, so
/// nobody should see it fail.
async fn reconnect_persisted(state: &Arc<AppState>) {
    let endpoint = state.settings.lock().await.endpoint.clone();
    let Some(endpoint) = endpoint else {
        debug!("no persisted printer endpoint; skipping auto-reconnect");
        return;
    };

    let mut transport = state.transport.lock().await;
    match transport.connect(endpoint.clone()).await {
        Ok(()) => info!(%endpoint, "reconnected to persisted printer"),
        Err(e) => warn!(%endpoint, error = %e, "persisted printer unreachable"),
    }
}

/// Background task dropping expired upload sessions.
async fn cleanup_sessions(state: Arc<AppState>) {
    let mut interval = tokio::time::interval(Duration::from_secs(60));
    let expiration = Duration::from_secs(SESSION_EXPIRATION_SECS);

    loop {
        interval.tick().await;
        let now = Instant::now();

        let mut sessions = state.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| now.duration_since(s.last_accessed) < expiration);
        let after = sessions.len();
        if before != after {
            debug!(removed = before - after, remaining = after, "expired upload sessions");
        }
    }
}
