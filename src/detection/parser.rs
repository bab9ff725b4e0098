use super::types::Classification;
use super::DetectionError;

/// Parse the model's message content into a classification.
///
/// JSON response mode is requested upstream, so the content is expected to be
/// exactly one JSON object. Anything else is a parsing error carrying the
/// serde cause.
pub fn parse_classification(content: &str) -> Result<Classification, DetectionError> {
    serde_json::from_str(content.trim())
        .map_err(|e| DetectionError::ResponseParsing(e.to_string()))
}
