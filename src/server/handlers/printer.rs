//! Printer connection API handlers.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::error_response;
use crate::server::state::AppState;
use crate::transport::Endpoint;

/// Request body for connect. Host and port arrive as the strings the user
/// typed; validation happens before any socket is created.
#[derive(Debug, Deserialize)]
pub struct ConnectRequest {
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub port: String,
}

#[derive(Debug, Deserialize)]
pub struct WidthRequest {
    pub width: String,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<EndpointInfo>,
    pub width: u16,
}

#[derive(Debug, Serialize)]
pub struct EndpointInfo {
    pub host: String,
    pub port: u16,
}

impl From<&Endpoint> for EndpointInfo {
    fn from(ep: &Endpoint) -> Self {
        Self {
            host: ep.host.clone(),
            port: ep.port,
        }
    }
}

/// POST /api/printer/connect - connect and persist the endpoint.
pub async fn connect(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ConnectRequest>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    let endpoint = Endpoint::parse(&req.host, &req.port).map_err(error_response)?;

    state
        .transport
        .lock()
        .await
        .connect(endpoint.clone())
        .await
        .map_err(error_response)?;

    // This was a user-initiated connect that succeeded: remember the
    // printer so the next launch can silently reconnect. A persistence
    // failure must not fail the connect itself.
    let mut settings = state.settings.lock().await;
    settings.endpoint = Some(endpoint);
    if let Err(e) = settings.save(&state.config.settings_path) {
        warn!(error = %e, "failed to persist printer endpoint");
    }

    Ok(Json(serde_json::json!({"success": true})))
}

/// POST /api/printer/disconnect
pub async fn disconnect(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    state.transport.lock().await.disconnect();
    Json(serde_json::json!({"success": true}))
}

/// GET /api/printer/status
pub async fn status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let transport = state.transport.lock().await;
    let settings = state.settings.lock().await;

    // Show the live endpoint when connected, the persisted one otherwise.
    let endpoint = transport
        .endpoint()
        .or(settings.endpoint.as_ref())
        .map(EndpointInfo::from);

    Json(StatusResponse {
        state: transport.state().to_string(),
        endpoint,
        width: settings.width.dots(),
    })
}

/// PUT /api/printer/width - set and persist the paper width.
pub async fn set_width(
    State(state): State<Arc<AppState>>,
    Json(req): Json<WidthRequest>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    let width = req.width.parse().map_err(error_response)?;

    let mut settings = state.settings.lock().await;
    settings.width = width;
    if let Err(e) = settings.save(&state.config.settings_path) {
        warn!(error = %e, "failed to persist paper width");
    }

    Ok(Json(serde_json::json!({"success": true, "width": width.dots()})))
}
