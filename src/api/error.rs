//! API error type for the classification gateway.
//!
//! The gateway's wire contract is a flat `{"message": ...}` JSON body:
//! 400 for caller mistakes, 500 for upstream or internal failures. The
//! upload endpoints have their own `{success, message}` contract and build
//! their responses inline instead of using this type.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::detection::DetectionError;

/// Flat error body returned by the detect endpoint.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    Validation(String),
    #[error("Upstream error: {0}")]
    Upstream(String),
    #[error("Processing error: {0}")]
    Processing(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Validation(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Upstream(message) | ApiError::Processing(message) => {
                tracing::error!(detail = %message, "Detect request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };

        (status, Json(ErrorBody { message })).into_response()
    }
}

impl From<DetectionError> for ApiError {
    fn from(err: DetectionError) -> Self {
        match err {
            e @ (DetectionError::NoImage | DetectionError::NotAnImage) => {
                ApiError::Validation(e.to_string())
            }
            DetectionError::Api { message } => ApiError::Upstream(message),
            other => ApiError::Processing(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn validation_returns_400_with_flat_body() {
        let response = ApiError::Validation("No image provided".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["message"], "No image provided");
        // Flat contract: no nested error object.
        assert!(json.get("error").is_none());
    }

    #[tokio::test]
    async fn upstream_returns_500_with_embedded_message() {
        let response = ApiError::Upstream("OpenAI API Error".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["message"], "OpenAI API Error");
    }

    #[tokio::test]
    async fn processing_returns_500() {
        let response = ApiError::Processing("boom".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn missing_image_maps_to_400() {
        let api_err: ApiError = DetectionError::NoImage.into();
        let response = api_err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["message"], "No image provided");
    }

    #[tokio::test]
    async fn non_image_file_maps_to_400() {
        let api_err: ApiError = DetectionError::NotAnImage.into();
        let response = api_err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["message"], "File must be an image");
    }

    #[tokio::test]
    async fn upstream_api_error_carries_its_message() {
        let api_err: ApiError = DetectionError::Api {
            message: "OpenAI API Error".into(),
        }
        .into();
        assert!(matches!(api_err, ApiError::Upstream(_)));
        let response = api_err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["message"], "OpenAI API Error");
    }

    #[tokio::test]
    async fn timeout_maps_to_500_naming_the_budget() {
        let api_err: ApiError = DetectionError::Timeout(60).into();
        let response = api_err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["message"], "Request timed out after 60s");
    }
}
