//! HTTP API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! The classification gateway and the upload store are independent services
//! that share only the mount point: each gets its own sub-router under
//! `/api/`, and stored images are served read-only under `/images/`.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::api::endpoints;
use crate::api::types::ApiContext;

/// Build the full API router.
///
/// The gateway and the upload store remain separate sub-routers wired to
/// the same shared context; nothing couples them beyond the mount point.
pub fn api_router(ctx: ApiContext) -> Router {
    // Classification gateway (multipart image in, DetectionResult out)
    let detect = Router::new()
        .route("/detect", post(endpoints::detect::detect))
        .with_state(ctx.clone());

    // Upload store + liveness probe
    let upload = Router::new()
        .route("/upload", post(endpoints::upload::upload))
        .route("/status", get(endpoints::status::status))
        .with_state(ctx.clone());

    // Stored files are public, keyed by their generated filename
    let images = ServeDir::new(ctx.uploads.upload_dir());

    Router::new()
        .nest("/api", detect)
        .nest("/api", upload)
        .nest_service("/images", images)
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024)) // 10 MB (multipart overhead)
        .layer(CorsLayer::permissive())
}
