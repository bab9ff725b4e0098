pub mod types;
pub mod prompt;
pub mod parser;
pub mod advice;
pub mod openai;
pub mod detector;

pub use types::*;
pub use prompt::*;
pub use parser::*;
pub use advice::*;
pub use openai::*;
pub use detector::*;

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum DetectionError {
    #[error("No image provided")]
    NoImage,

    #[error("File must be an image")]
    NotAnImage,

    #[error("Cannot reach the vision API at {0}")]
    Connection(String),

    #[error("Request timed out after {0}s")]
    Timeout(u64),

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("{message}")]
    Api { message: String },

    #[error("Response parsing error: {0}")]
    ResponseParsing(String),

    #[error("Model reply contained no content")]
    MissingContent,
}
