//! Leaf classification against a hosted vision model.
//!
//! One call per photo: validate the declared MIME type, encode the image as
//! a data URL, ask the model, parse the JSON reply, and normalize it into a
//! `DetectionResult` (healthy verdicts never name a disease, diseased
//! verdicts always carry advice).

use std::sync::Arc;

use base64::Engine as _;

use super::advice::{advice_for_disease, DEFAULT_DISEASE_ADVICE, HEALTHY_ADVICE};
use super::parser::parse_classification;
use super::prompt::{SYSTEM_PROMPT, USER_PROMPT};
use super::types::{DetectionResult, LeafStatus, VisionClient};
use super::DetectionError;

/// Stateless leaf classifier.
///
/// Each call validates, makes one upstream request, and normalizes the
/// reply. Calls share nothing, so concurrent use needs no coordination.
pub struct LeafDetector {
    client: Arc<dyn VisionClient>,
}

impl LeafDetector {
    pub fn new(client: Arc<dyn VisionClient>) -> Self {
        Self { client }
    }

    /// Classify one leaf photo.
    ///
    /// `mime_type` is whatever the caller declared for the upload; anything
    /// outside `image/*` is rejected before the upstream call.
    pub fn detect(
        &self,
        mime_type: &str,
        image: &[u8],
    ) -> Result<DetectionResult, DetectionError> {
        if !mime_type.starts_with("image/") {
            return Err(DetectionError::NotAnImage);
        }

        let _span = tracing::info_span!(
            "leaf_detect",
            mime = %mime_type,
            image_size = image.len(),
        )
        .entered();
        let start = std::time::Instant::now();

        let base64_image = base64::engine::general_purpose::STANDARD.encode(image);
        let data_url = format!("data:{mime_type};base64,{base64_image}");

        let content = self
            .client
            .chat_with_image(SYSTEM_PROMPT, USER_PROMPT, &data_url)?;

        let classification = parse_classification(&content)?;

        let result = match classification.status {
            LeafStatus::Healthy => DetectionResult {
                status: LeafStatus::Healthy,
                disease: None,
                confidence: classification.confidence,
                advice: Some(HEALTHY_ADVICE.to_string()),
            },
            LeafStatus::Diseased => {
                let advice = classification
                    .disease
                    .as_deref()
                    .map(advice_for_disease)
                    .unwrap_or(DEFAULT_DISEASE_ADVICE);
                DetectionResult {
                    status: LeafStatus::Diseased,
                    disease: classification.disease,
                    confidence: classification.confidence,
                    advice: Some(advice.to_string()),
                }
            }
        };

        tracing::info!(
            elapsed_ms = %start.elapsed().as_millis(),
            status = ?result.status,
            "Leaf classification complete"
        );

        Ok(result)
    }
}
