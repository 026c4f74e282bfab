//! HTTP handlers for the server.

pub mod print;
pub mod printer;

use axum::Json;
use axum::http::StatusCode;

use crate::error::ReciboError;

/// Map a crate error onto an HTTP error response.
///
/// Validation and image problems are the client's to fix; a missing
/// connection is a conflict with current printer state; everything touching
/// the printer itself is a gateway-style failure.
pub(crate) fn error_response(e: ReciboError) -> (StatusCode, Json<serde_json::Value>) {
    let status = match &e {
        ReciboError::Validation(_) | ReciboError::Image(_) => StatusCode::BAD_REQUEST,
        ReciboError::NotConnected => StatusCode::CONFLICT,
        ReciboError::Connection(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(serde_json::json!({"success": false, "error": e.to_string()})),
    )
}
