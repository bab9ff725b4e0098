//! HTTP API surface.
//!
//! Two independent services share one server: the classification gateway
//! (`POST /api/detect`) and the image upload store (`POST /api/upload`,
//! `GET /api/status`, static `/images/`).
//!
//! The router is composable: `api_router()` returns a `Router` that can
//! be mounted on any axum server instance.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod server;
pub mod types;

pub use router::api_router;
pub use server::{start_server, ApiServer, ApiSession};
pub use types::ApiContext;
