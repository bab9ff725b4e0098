//! Phytora backend: apple-leaf disease detection over HTTP.
//!
//! A vision-language model does the actual classification; this crate is
//! the plumbing around it. The classification gateway accepts a leaf
//! photo, asks the model for a verdict, and maps it onto a fixed advice
//! table. A separate upload store persists raw images and serves them
//! back. The scan history and batch-scan modules drive the gateway as a
//! library, for clients that keep results across sessions.

pub mod api;
pub mod config;
pub mod detection; // Classification gateway: image in, verdict + advice out
pub mod history; // Persisted scan history with paging
pub mod scan; // Sequential batch scan over the gateway
pub mod uploads;

use tracing_subscriber::EnvFilter;

/// Initialize tracing, honoring `RUST_LOG` when set.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::DEFAULT_LOG_FILTER)),
        )
        .init();
}
