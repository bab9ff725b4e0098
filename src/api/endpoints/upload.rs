//! Upload store endpoint.
//!
//! Wire contract: `{success, message}` plus a `data` object on success.
//! Responses are built inline because this contract predates the gateway's
//! flat error shape and the two are served side by side.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::api::types::ApiContext;
use crate::uploads::{resolve_mimetype, StoredImage};

#[derive(Serialize)]
struct UploadSuccess {
    success: bool,
    message: &'static str,
    data: StoredImage,
}

#[derive(Serialize)]
struct UploadFailure {
    success: bool,
    message: String,
}

fn failure(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(UploadFailure {
            success: false,
            message: message.into(),
        }),
    )
        .into_response()
}

/// `POST /api/upload`: store one image on disk.
pub async fn upload(State(ctx): State<ApiContext>, mut multipart: Multipart) -> Response {
    // (original name, mimetype, bytes)
    let mut image: Option<(String, String, Vec<u8>)> = None;

    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name().unwrap_or("") != "image" {
            continue;
        }
        let original_name = field.file_name().unwrap_or("image").to_string();
        let mimetype = resolve_mimetype(field.content_type(), &original_name);
        match field.bytes().await {
            Ok(bytes) => image = Some((original_name, mimetype, bytes.to_vec())),
            Err(e) => {
                tracing::warn!("Failed to read upload bytes: {e}");
                return failure(StatusCode::BAD_REQUEST, e.to_string());
            }
        }
    }

    let Some((original_name, mimetype, bytes)) = image else {
        return failure(
            StatusCode::BAD_REQUEST,
            "No image was uploaded or file is not an image",
        );
    };

    if !mimetype.starts_with("image/") {
        return failure(
            StatusCode::BAD_REQUEST,
            "No image was uploaded or file is not an image",
        );
    }

    if ctx.uploads.exceeds_limit(bytes.len() as u64) {
        return failure(
            StatusCode::PAYLOAD_TOO_LARGE,
            "File too large. Maximum size is 5MB.",
        );
    }

    match ctx.uploads.save(&original_name, &mimetype, &bytes) {
        Ok(stored) => {
            tracing::info!(
                filename = %stored.filename,
                size = stored.size,
                "Image uploaded"
            );
            (
                StatusCode::CREATED,
                Json(UploadSuccess {
                    success: true,
                    message: "Image uploaded successfully",
                    data: stored,
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!("Failed to save upload: {e}");
            failure(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}
