//! Image upload, preview, and print handlers.
//!
//! The flow mirrors how a cashier actually prints: upload once, preview the
//! dithered result at the current paper width, then print. Uploads live in
//! an in-memory session store and expire if untouched.

use std::sync::Arc;
use std::time::Instant;

use axum::Json;
use axum::extract::{Multipart, Path, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use image::DynamicImage;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use super::error_response;
use crate::encoder::{self, Bitmap, EncodeOptions};
use crate::error::ReciboError;
use crate::preview;
use crate::printer::PrinterProfile;
use crate::protocol;
use crate::server::state::{AppState, PrintSession, SESSION_EXPIRATION_SECS};

/// Response from the upload endpoint.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub id: String,
    pub width: u32,
    pub height: u32,
}

/// POST /api/print/upload - upload an image for printing.
pub async fn upload(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, (StatusCode, Json<serde_json::Value>)> {
    cleanup_expired_sessions(&state).await;

    // Extract the image field from multipart
    let mut image_data: Option<Vec<u8>> = None;
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        error_response(ReciboError::Validation(format!("Multipart error: {}", e)))
    })? {
        if field.name() == Some("image") {
            let bytes = field.bytes().await.map_err(|e| {
                error_response(ReciboError::Validation(format!(
                    "Failed to read image field: {}",
                    e
                )))
            })?;
            image_data = Some(bytes.to_vec());
            break;
        }
    }

    let bytes = image_data.ok_or_else(|| {
        error_response(ReciboError::Validation("No image field found".to_string()))
    })?;

    // Decode on the blocking pool; large JPEGs are not awaitable work.
    let img = tokio::task::spawn_blocking(move || {
        image::load_from_memory(&bytes)
            .map_err(|e| ReciboError::Image(format!("Failed to decode image: {}", e)))
    })
    .await
    .map_err(|e| error_response(ReciboError::Image(format!("Decode task failed: {}", e))))?
    .map_err(error_response)?;

    let (width, height) = (img.width(), img.height());
    let id = Uuid::new_v4();
    state
        .sessions
        .write()
        .await
        .insert(id, PrintSession::new(img));

    Ok(Json(UploadResponse {
        id: id.to_string(),
        width,
        height,
    }))
}

/// GET /api/print/{id}/preview - PNG of the encoded monochrome raster.
pub async fn preview_png(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, Json<serde_json::Value>)> {
    let image = session_image(&state, &id).await?;
    let width = state.settings.lock().await.width.dots() as u32;

    let png = tokio::task::spawn_blocking(move || {
        let raster = encoder::encode(Bitmap::from_image(&image), &EncodeOptions::for_width(width));
        preview::raster_to_png(&raster)
    })
    .await
    .map_err(|e| error_response(ReciboError::Image(format!("Preview task failed: {}", e))))?
    .map_err(error_response)?;

    Ok(([(header::CONTENT_TYPE, "image/png")], png))
}

/// POST /api/print/{id}/print - encode and send to the connected printer.
pub async fn print(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    let image = session_image(&state, &id).await?;
    let profile = PrinterProfile::for_paper(state.settings.lock().await.width);

    let job = tokio::task::spawn_blocking(move || {
        let raster = encoder::encode(
            Bitmap::from_image(&image),
            &EncodeOptions::for_width(profile.width_dots() as u32),
        );
        protocol::print_job_with_stripe_rows(&raster, profile.max_stripe_rows as usize)
    })
    .await
    .map_err(|e| error_response(ReciboError::Image(format!("Encode task failed: {}", e))))?;

    // A blank image encodes to an empty job; skipping the send is the
    // no-op path, not a failure.
    if job.is_empty() {
        return Ok(Json(serde_json::json!({
            "success": true,
            "message": "Nothing to print: image is blank"
        })));
    }

    info!(session = %id, bytes = job.len(), "printing upload");
    state
        .transport
        .lock()
        .await
        .send(&job)
        .await
        .map_err(error_response)?;

    Ok(Json(serde_json::json!({"success": true})))
}

/// Fetch (and touch) a session's image by id.
async fn session_image(
    state: &Arc<AppState>,
    id: &str,
) -> Result<DynamicImage, (StatusCode, Json<serde_json::Value>)> {
    let id = Uuid::parse_str(id).map_err(|_| {
        error_response(ReciboError::Validation("Invalid session ID".to_string()))
    })?;

    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or((
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({"success": false, "error": "Session not found or expired"})),
    ))?;

    session.touch();
    // Clone to release the lock before the CPU-heavy encode
    Ok(session.image.clone())
}

/// Drop sessions that have gone untouched past the expiration window.
async fn cleanup_expired_sessions(state: &Arc<AppState>) {
    let now = Instant::now();
    let mut sessions = state.sessions.write().await;
    sessions.retain(|_, s| now.duration_since(s.last_accessed).as_secs() < SESSION_EXPIRATION_SECS);
}
