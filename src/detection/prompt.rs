//! Fixed prompts and call budget for the leaf classification request.
//!
//! The model is asked for a single JSON object so the reply can be parsed
//! strictly; JSON response mode is requested alongside to keep it honest.

/// Hosted vision model used for classification.
pub const DETECTION_MODEL: &str = "gpt-4o";

/// Completion budget; the reply is one small JSON object.
pub const MAX_COMPLETION_TOKENS: u32 = 300;

/// Upstream call budget. The HTTP client gives up after this long.
pub const UPSTREAM_TIMEOUT_SECS: u64 = 60;

pub const SYSTEM_PROMPT: &str = "\
You are an expert in apple leaf disease detection. Your only task is to determine \
whether an apple leaf is healthy or diseased. The known diseases are 'Apple Scab' \
and 'Apple Rust'. Respond with ONLY a JSON object of the form \
{\"status\": \"Healthy\" or \"Diseased\", \"disease\": disease name or null, \
\"confidence\": number from 0 to 100} and nothing else. \
When the leaf is healthy, disease must be null.";

pub const USER_PROMPT: &str = "\
Is this apple leaf healthy or diseased? Respond with ONLY the JSON object.";
