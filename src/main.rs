use std::net::SocketAddr;
use std::process::ExitCode;
use std::sync::Arc;

use phytora::api::{start_server, ApiContext};
use phytora::config::{self, Settings};
use phytora::detection::{LeafDetector, OpenAiClient};
use phytora::uploads::{UploadConfig, UploadStore};

#[tokio::main]
async fn main() -> ExitCode {
    phytora::init_tracing();
    tracing::info!("Phytora starting v{}", config::APP_VERSION);

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("Configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        upload_dir = %settings.upload_dir.display(),
        "Upload directory configured"
    );

    let client = Arc::new(OpenAiClient::new(&settings.base_url, &settings.api_key));
    let detector = Arc::new(LeafDetector::new(client));
    let uploads = Arc::new(UploadStore::new(UploadConfig {
        upload_dir: settings.upload_dir.clone(),
        ..UploadConfig::default()
    }));

    let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));
    let mut server = match start_server(ApiContext::new(detector, uploads), addr).await {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("Startup failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Cannot listen for Ctrl-C: {e}");
    }

    tracing::info!("Shutdown requested");
    server.shutdown();
    server.join().await;

    ExitCode::SUCCESS
}
