use serde::{Deserialize, Serialize};

use super::DetectionError;

/// Health verdict for a single apple leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeafStatus {
    Healthy,
    Diseased,
}

/// The model's parsed reply, before advice is attached.
///
/// `confidence` stays a raw JSON number so the value the model produced is
/// forwarded verbatim (an integer `100` is not rewritten as `100.0`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Classification {
    pub status: LeafStatus,
    #[serde(default)]
    pub disease: Option<String>,
    pub confidence: serde_json::Number,
}

/// Detection verdict returned to API callers.
///
/// Invariants: a `Healthy` result carries no disease name, and `advice` is
/// always populated (disease-specific, generic fallback, or the healthy
/// maintenance message).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    pub status: LeafStatus,
    pub disease: Option<String>,
    pub confidence: serde_json::Number,
    pub advice: Option<String>,
}

/// Chat interface to a hosted vision model.
///
/// Takes a system prompt, a user prompt, and one image as a data URL;
/// returns the raw message content of the model's reply.
pub trait VisionClient: Send + Sync {
    fn chat_with_image(
        &self,
        system: &str,
        prompt: &str,
        image_data_url: &str,
    ) -> Result<String, DetectionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaf_status_serializes_as_capitalized_word() {
        assert_eq!(
            serde_json::to_string(&LeafStatus::Healthy).unwrap(),
            "\"Healthy\""
        );
        assert_eq!(
            serde_json::to_string(&LeafStatus::Diseased).unwrap(),
            "\"Diseased\""
        );
    }

    #[test]
    fn leaf_status_rejects_unknown_value() {
        let result: Result<LeafStatus, _> = serde_json::from_str("\"Wilted\"");
        assert!(result.is_err());
    }

    #[test]
    fn detection_result_keeps_null_fields_on_the_wire() {
        let result = DetectionResult {
            status: LeafStatus::Healthy,
            disease: None,
            confidence: serde_json::Number::from(100),
            advice: Some("Continue regular maintenance and monitoring.".into()),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["status"], "Healthy");
        assert!(json["disease"].is_null());
        assert_eq!(json["confidence"], 100);
    }

    #[test]
    fn integer_confidence_stays_integer() {
        let result = DetectionResult {
            status: LeafStatus::Diseased,
            disease: Some("Apple Scab".into()),
            confidence: serde_json::Number::from(85),
            advice: Some("advice".into()),
        };
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"confidence\":85"), "Got: {json}");
        assert!(!json.contains("85.0"), "Got: {json}");
    }

    #[test]
    fn fractional_confidence_survives_round_trip() {
        let json = r#"{"status":"Diseased","disease":"Apple Rust","confidence":87.3}"#;
        let parsed: Classification = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.confidence.as_f64(), Some(87.3));
        assert_eq!(serde_json::to_string(&parsed.confidence).unwrap(), "87.3");
    }

    #[test]
    fn classification_tolerates_missing_disease_field() {
        let json = r#"{"status":"Healthy","confidence":95.8}"#;
        let parsed: Classification = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.status, LeafStatus::Healthy);
        assert_eq!(parsed.disease, None);
    }
}
