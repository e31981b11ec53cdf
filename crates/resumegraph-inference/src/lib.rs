//! resumegraph Inference Layer
//!
//! Pluggable implementations of the `InferenceService` trait from
//! `resumegraph-domain`.
//!
//! # Providers
//!
//! - `MockInference`: Deterministic mock for testing
//! - `ChatInference`: OpenAI-compatible chat-completions API integration
//!
//! # Examples
//!
//! ```
//! use resumegraph_inference::MockInference;
//! use resumegraph_domain::traits::{InferenceService, ProposeRequest};
//! use resumegraph_domain::SectionKind;
//!
//! let service = MockInference::new();
//! let request = ProposeRequest::Section {
//!     kind: SectionKind::Skills,
//!     title: "## Skills".to_string(),
//!     content: "Rust, Python".to_string(),
//! };
//! let response = service.propose(&request).unwrap();
//! assert!(response.triplets.is_empty());
//! ```

#![warn(missing_docs)]

pub mod chat;
mod parser;
pub mod prompt;

use resumegraph_domain::traits::{
    InferenceService, PreparedDocument, ProposeRequest, ProposeResponse,
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use chat::ChatInference;
pub use parser::parse_triplets;

/// Errors that can occur during inference operations
#[derive(Error, Debug)]
pub enum InferenceError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from the model
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("Inference error: {0}")]
    Other(String),
}

/// Mock inference service for deterministic testing
///
/// Proposal responses are served from a queue in call order; when the queue
/// is empty, an empty proposal is returned. Document preparation passes the
/// input through unchanged unless a rejection is configured.
///
/// # Examples
///
/// ```
/// use resumegraph_inference::MockInference;
/// use resumegraph_domain::traits::{InferenceService, ProposeResponse};
/// use resumegraph_domain::Triplet;
///
/// let service = MockInference::new();
/// service.queue_response(ProposeResponse {
///     triplets: vec![Triplet::new("Alice", "HAS_SKILL", "Rust")],
///     validation_status: true,
///     message: "ok".to_string(),
/// });
/// ```
#[derive(Debug, Clone)]
pub struct MockInference {
    responses: Arc<Mutex<VecDeque<Result<ProposeResponse, String>>>>,
    rejection_message: Option<String>,
    propose_calls: Arc<Mutex<usize>>,
}

impl MockInference {
    /// Create a mock that proposes nothing and accepts every document
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            rejection_message: None,
            propose_calls: Arc::new(Mutex::new(0)),
        }
    }

    /// Configure document preparation to reject with the given message
    pub fn rejecting(message: impl Into<String>) -> Self {
        Self {
            rejection_message: Some(message.into()),
            ..Self::new()
        }
    }

    /// Queue a proposal response to serve on the next `propose` call
    pub fn queue_response(&self, response: ProposeResponse) {
        self.responses.lock().unwrap().push_back(Ok(response));
    }

    /// Queue a proposal failure to serve on the next `propose` call
    pub fn queue_error(&self, message: impl Into<String>) {
        self.responses.lock().unwrap().push_back(Err(message.into()));
    }

    /// Queue a successful response containing the given triplets
    pub fn queue_triplets(&self, triplets: Vec<resumegraph_domain::Triplet>) {
        self.queue_response(ProposeResponse {
            triplets,
            validation_status: true,
            message: "mock proposal".to_string(),
        });
    }

    /// Number of times `propose` has been called
    pub fn propose_calls(&self) -> usize {
        *self.propose_calls.lock().unwrap()
    }
}

impl Default for MockInference {
    fn default() -> Self {
        Self::new()
    }
}

impl InferenceService for MockInference {
    type Error = InferenceError;

    fn prepare(&self, raw_document: &str) -> Result<PreparedDocument, Self::Error> {
        if let Some(message) = &self.rejection_message {
            return Ok(PreparedDocument {
                formatted: String::new(),
                accepted: false,
                message: message.clone(),
            });
        }

        Ok(PreparedDocument {
            formatted: raw_document.to_string(),
            accepted: true,
            message: "mock preparation".to_string(),
        })
    }

    fn propose(&self, _request: &ProposeRequest) -> Result<ProposeResponse, Self::Error> {
        *self.propose_calls.lock().unwrap() += 1;

        match self.responses.lock().unwrap().pop_front() {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(InferenceError::Other(message)),
            None => Ok(ProposeResponse {
                triplets: Vec::new(),
                validation_status: true,
                message: "no triplets proposed".to_string(),
            }),
        }
    }
}
