//! Shared state for the API layer.

use std::sync::Arc;

use crate::detection::LeafDetector;
use crate::uploads::UploadStore;

/// Shared context for all API routes.
///
/// The detector and the upload store are independent pieces; they meet only
/// here so a single served application can host both.
#[derive(Clone)]
pub struct ApiContext {
    pub detector: Arc<LeafDetector>,
    pub uploads: Arc<UploadStore>,
}

impl ApiContext {
    pub fn new(detector: Arc<LeafDetector>, uploads: Arc<UploadStore>) -> Self {
        Self { detector, uploads }
    }
}
