use serde::{Deserialize, Serialize};

use super::prompt::{DETECTION_MODEL, MAX_COMPLETION_TOKENS, UPSTREAM_TIMEOUT_SECS};
use super::types::VisionClient;
use super::DetectionError;

/// OpenAI chat-completions client for hosted vision inference.
///
/// The API key lives only in this struct and is sent as a bearer header;
/// it is never logged and never appears in any error.
pub struct OpenAiClient {
    base_url: String,
    api_key: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl OpenAiClient {
    /// Create a client for the given API host with the standard call budget.
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self::with_timeout(base_url, api_key, UPSTREAM_TIMEOUT_SECS)
    }

    pub fn with_timeout(base_url: &str, api_key: &str, timeout_secs: u64) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client,
            timeout_secs,
        }
    }
}

/// Request body for /v1/chat/completions
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: MessageContent<'a>,
}

/// A message carries either plain text (system) or text plus an image (user).
#[derive(Serialize)]
#[serde(untagged)]
enum MessageContent<'a> {
    Text(&'a str),
    Parts(Vec<ContentPart<'a>>),
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart<'a> {
    Text { text: &'a str },
    ImageUrl { image_url: ImageUrl<'a> },
}

#[derive(Serialize)]
struct ImageUrl<'a> {
    url: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

/// Response body from /v1/chat/completions
#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Error envelope the API returns on non-success statuses.
#[derive(Deserialize)]
struct ErrorEnvelope {
    error: Option<ErrorDetail>,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: Option<String>,
}

/// Pull the embedded `error.message` out of a failed response body, falling
/// back to the generic failure text when the body is not the documented
/// envelope.
fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.error)
        .and_then(|detail| detail.message)
        .unwrap_or_else(|| "OpenAI API request failed".to_string())
}

impl VisionClient for OpenAiClient {
    fn chat_with_image(
        &self,
        system: &str,
        prompt: &str,
        image_data_url: &str,
    ) -> Result<String, DetectionError> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        let body = ChatRequest {
            model: DETECTION_MODEL,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: MessageContent::Text(system),
                },
                ChatMessage {
                    role: "user",
                    content: MessageContent::Parts(vec![
                        ContentPart::Text { text: prompt },
                        ContentPart::ImageUrl {
                            image_url: ImageUrl {
                                url: image_data_url,
                            },
                        },
                    ]),
                },
            ],
            max_tokens: MAX_COMPLETION_TOKENS,
            response_format: ResponseFormat {
                format_type: "json_object",
            },
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    DetectionError::Timeout(self.timeout_secs)
                } else if e.is_connect() {
                    DetectionError::Connection(self.base_url.clone())
                } else {
                    DetectionError::HttpClient(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(DetectionError::Api {
                message: extract_error_message(&body),
            });
        }

        let parsed: ChatResponse = response
            .json()
            .map_err(|e| DetectionError::ResponseParsing(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(DetectionError::MissingContent)
    }
}

/// Mock vision client for tests: every call yields the same canned outcome,
/// either a reply or an error.
pub struct MockVisionClient {
    reply: Result<String, DetectionError>,
}

impl MockVisionClient {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
        }
    }

    /// Mock whose every call fails with the given error.
    pub fn failing(error: DetectionError) -> Self {
        Self { reply: Err(error) }
    }
}

impl VisionClient for MockVisionClient {
    fn chat_with_image(
        &self,
        _system: &str,
        _prompt: &str,
        _image_data_url: &str,
    ) -> Result<String, DetectionError> {
        self.reply.clone()
    }
}
