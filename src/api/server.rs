//! API server lifecycle: starts and stops the axum HTTP server.
//!
//! Pattern: bind, spawn the serve loop as a background task, return a
//! handle with a shutdown channel. The handle also owns the task, so
//! callers can wait for in-flight requests to drain after signalling
//! shutdown.

use std::net::SocketAddr;

use serde::Serialize;
use tokio::sync::oneshot;
use uuid::Uuid;

use crate::api::router::api_router;
use crate::api::types::ApiContext;

// ═══════════════════════════════════════════════════════════
// Public types
// ═══════════════════════════════════════════════════════════

/// Session metadata for a running API server.
#[derive(Debug, Clone, Serialize)]
pub struct ApiSession {
    pub session_id: String,
    pub server_addr: String,
    pub port: u16,
    pub started_at: String,
}

/// Handle to a running API server.
pub struct ApiServer {
    pub session: ApiSession,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: tokio::task::JoinHandle<()>,
}

impl ApiServer {
    /// Signal the server to shut down gracefully. Safe to call twice.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            tracing::info!("API server shutdown signal sent");
        }
    }

    /// Wait for the serve task to finish. Call after `shutdown()` to let
    /// in-flight requests drain.
    pub async fn join(self) {
        if let Err(e) = self.task.await {
            tracing::error!("API server task failed: {e}");
        }
    }
}

// ═══════════════════════════════════════════════════════════
// Server lifecycle
// ═══════════════════════════════════════════════════════════

/// Start the API server on the given address.
///
/// Binds a TCP listener, mounts `api_router`, and spawns the axum server
/// in a background tokio task. Returns an `ApiServer` handle with session
/// metadata and a shutdown channel.
pub async fn start_server(ctx: ApiContext, addr: SocketAddr) -> Result<ApiServer, String> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| format!("Failed to bind API server: {e}"))?;

    // Re-read the address: port 0 resolves to the OS-assigned port
    let addr = listener
        .local_addr()
        .map_err(|e| format!("Failed to get server address: {e}"))?;

    let app = api_router(ctx);

    let session = ApiSession {
        session_id: Uuid::new_v4().to_string(),
        server_addr: addr.to_string(),
        port: addr.port(),
        started_at: chrono::Utc::now().to_rfc3339(),
    };

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        let shutdown_signal = async move {
            let _ = shutdown_rx.await;
            tracing::info!("API server received shutdown signal");
        };

        tracing::info!(%addr, "API server started");

        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal)
            .await
        {
            tracing::error!("API server error: {e}");
        }

        tracing::info!("API server stopped");
    });

    Ok(ApiServer {
        session,
        shutdown_tx: Some(shutdown_tx),
        task,
    })
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::sync::Arc;

    use crate::detection::{LeafDetector, MockVisionClient};
    use crate::uploads::{UploadConfig, UploadStore};

    fn test_ctx(upload_dir: &Path) -> ApiContext {
        let detector = Arc::new(LeafDetector::new(Arc::new(MockVisionClient::new(
            r#"{"status":"Healthy","confidence":100}"#,
        ))));
        let uploads = Arc::new(UploadStore::new(UploadConfig {
            upload_dir: upload_dir.to_path_buf(),
            max_file_size: 5 * 1024 * 1024,
        }));
        ApiContext::new(detector, uploads)
    }

    fn loopback() -> SocketAddr {
        SocketAddr::from(([127, 0, 0, 1], 0))
    }

    #[tokio::test]
    async fn start_and_stop_server() {
        let tmp = tempfile::tempdir().unwrap();
        let mut server = start_server(test_ctx(tmp.path()), loopback())
            .await
            .expect("server should start");

        assert!(!server.session.session_id.is_empty());
        assert!(server.session.port > 0);

        let url = format!("http://127.0.0.1:{}/api/status", server.session.port);
        let resp = reqwest::get(&url).await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::OK);

        let json: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(json["status"], "online");

        server.shutdown();
        server.join().await;
    }

    #[tokio::test]
    async fn server_session_has_valid_metadata() {
        let tmp = tempfile::tempdir().unwrap();
        let mut server = start_server(test_ctx(tmp.path()), loopback())
            .await
            .expect("server should start");

        assert!(!server.session.started_at.is_empty());
        assert!(server.session.server_addr.contains(':'));

        server.shutdown();
    }

    #[tokio::test]
    async fn server_serves_api_routes() {
        let tmp = tempfile::tempdir().unwrap();
        let mut server = start_server(test_ctx(tmp.path()), loopback())
            .await
            .expect("server should start");

        let port = server.session.port;

        // Unknown route returns 404
        let resp = reqwest::get(format!("http://127.0.0.1:{port}/nonexistent"))
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);

        // Detect without a multipart body is rejected before the handler runs
        let client = reqwest::Client::new();
        let resp = client
            .post(format!("http://127.0.0.1:{port}/api/detect"))
            .send()
            .await
            .unwrap();
        assert!(
            resp.status().is_client_error(),
            "Expected 4xx, got {}",
            resp.status()
        );

        server.shutdown();
    }

    #[tokio::test]
    async fn bind_failure_is_reported() {
        let tmp = tempfile::tempdir().unwrap();

        // Hold the port so the server cannot bind it
        let holder = tokio::net::TcpListener::bind(loopback()).await.unwrap();
        let taken = holder.local_addr().unwrap();

        let err = start_server(test_ctx(tmp.path()), taken)
            .await
            .err()
            .expect("bind should fail");
        assert!(err.contains("Failed to bind"), "Got: {err}");
    }

    #[tokio::test]
    async fn shutdown_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let mut server = start_server(test_ctx(tmp.path()), loopback())
            .await
            .expect("server should start");

        server.shutdown();
        server.shutdown(); // Second call should be safe
        server.join().await;
    }
}
