//! Error types for the extraction orchestrator

use thiserror::Error;

/// Errors that can occur during extraction orchestration
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Document exceeds the configured maximum length
    #[error("Document too long: {0} chars (max: {1})")]
    DocumentTooLong(usize, usize),

    /// A combined topic-extraction call failed
    #[error("Inference error: {0}")]
    Inference(String),

    /// A combined topic-extraction call timed out
    #[error("Extraction timeout")]
    Timeout,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
