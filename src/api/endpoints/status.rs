//! Liveness endpoint for the upload API.

use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub message: &'static str,
}

/// `GET /api/status`: static liveness payload.
pub async fn status() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "online",
        message: "Image upload API is running",
    })
}
