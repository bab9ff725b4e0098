//! Sequential multi-image scan workflow.
//!
//! Drives up to `MAX_IMAGES` photos through the detector one at a time. A
//! failed analysis contributes a placeholder result and the batch keeps
//! going; successes are recorded to the scan history. Detector calls share
//! no state, so sequencing here is a simplicity choice, not a constraint.

use base64::Engine as _;
use thiserror::Error;

use crate::detection::{DetectionResult, LeafDetector, LeafStatus};
use crate::history::{ScanHistory, ScanRecord};

/// Most photos accepted per batch; extras are dropped.
pub const MAX_IMAGES: usize = 5;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Please select at least one image to analyze.")]
    NoImages,
}

/// One photo queued for scanning.
#[derive(Debug, Clone)]
pub struct ScanImage {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Outcome of a batch scan.
#[derive(Debug)]
pub struct BatchReport {
    /// One result per scanned image, in submission order.
    pub results: Vec<DetectionResult>,
    /// Records appended to the history. Failures are never recorded.
    pub recorded: usize,
    pub failed: usize,
}

impl BatchReport {
    /// Banner shown when not a single image could be analyzed.
    pub fn batch_error(&self) -> Option<&'static str> {
        if !self.results.is_empty() && self.failed == self.results.len() {
            Some("All image analyses failed. Please check your connection and try again.")
        } else {
            None
        }
    }
}

/// Scan a batch of photos sequentially, recording successes to the history.
pub fn run_batch(
    detector: &LeafDetector,
    history: &ScanHistory,
    mut images: Vec<ScanImage>,
) -> Result<BatchReport, ScanError> {
    if images.is_empty() {
        return Err(ScanError::NoImages);
    }
    if images.len() > MAX_IMAGES {
        tracing::warn!(
            submitted = images.len(),
            kept = MAX_IMAGES,
            "Scan batch over the image limit, dropping extras"
        );
        images.truncate(MAX_IMAGES);
    }

    let start = std::time::Instant::now();
    let mut results = Vec::with_capacity(images.len());
    let mut records = Vec::new();
    let mut failed = 0usize;

    for (index, image) in images.iter().enumerate() {
        match detector.detect(&image.mime_type, &image.bytes) {
            Ok(result) => {
                records.push(ScanRecord::new(
                    preview_data_url(image),
                    result.clone(),
                    index,
                ));
                results.push(result);
            }
            Err(e) => {
                tracing::warn!(
                    image = %image.name,
                    index,
                    error = %e,
                    "Image analysis failed, continuing batch"
                );
                failed += 1;
                results.push(failure_placeholder(&e.to_string()));
            }
        }
    }

    // History persistence must not eat the batch results.
    let recorded = if records.is_empty() {
        0
    } else {
        let count = records.len();
        match history.append(records) {
            Ok(_) => count,
            Err(e) => {
                tracing::error!(error = %e, "Failed to persist scan history");
                0
            }
        }
    };

    tracing::info!(
        scanned = results.len(),
        recorded,
        failed,
        elapsed_ms = %start.elapsed().as_millis(),
        "Scan batch complete"
    );

    Ok(BatchReport {
        results,
        recorded,
        failed,
    })
}

/// Placeholder slotted in for an image whose analysis failed, keeping the
/// results aligned with the submitted order.
pub fn failure_placeholder(message: &str) -> DetectionResult {
    DetectionResult {
        status: LeafStatus::Diseased,
        disease: Some("Analysis Failed".into()),
        confidence: serde_json::Number::from(0),
        advice: Some(format!(
            "Analysis failed: {message}. Please try again with a clearer image."
        )),
    }
}

/// Data-URL preview stored alongside a history record.
fn preview_data_url(image: &ScanImage) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(&image.bytes);
    format!("data:{};base64,{encoded}", image.mime_type)
}
