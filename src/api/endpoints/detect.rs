//! Classification gateway endpoint.

use axum::extract::{Multipart, State};
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::detection::{DetectionError, DetectionResult};

/// `POST /api/detect`: classify one leaf photo.
///
/// Expects a multipart form with an `image` field. The upstream client is
/// blocking, so the call runs on the blocking pool instead of tying up an
/// async worker for the length of the call budget.
pub async fn detect(
    State(ctx): State<ApiContext>,
    mut multipart: Multipart,
) -> Result<Json<DetectionResult>, ApiError> {
    let mut image: Option<(String, Vec<u8>)> = None;

    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name().unwrap_or("") != "image" {
            continue;
        }
        // The declared field type is what gets validated; a field without
        // one fails the image check downstream.
        let mime_type = field.content_type().unwrap_or("").to_string();
        match field.bytes().await {
            Ok(bytes) => image = Some((mime_type, bytes.to_vec())),
            Err(e) => {
                tracing::warn!("Failed to read detect upload: {e}");
                return Err(ApiError::Validation(e.to_string()));
            }
        }
    }

    let (mime_type, bytes) = image.ok_or(DetectionError::NoImage)?;

    let detector = ctx.detector.clone();
    let result = tokio::task::spawn_blocking(move || detector.detect(&mime_type, &bytes))
        .await
        .map_err(|e| ApiError::Processing(format!("Task failed: {e}")))??;

    Ok(Json(result))
}
