//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and
//! infrastructure. Infrastructure implementations live in other crates.

use crate::{SectionKind, Triplet};
use std::path::Path;

/// A document after the inference service's preparation pass
///
/// Preparation formats the raw text and validates it as a whole; a rejected
/// document is fatal for the ingestion attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedDocument {
    /// The formatted document text
    pub formatted: String,

    /// Whether the document passed whole-document validation
    pub accepted: bool,

    /// Summary of the preparation pass, or the rejection reason
    pub message: String,
}

/// Input for one triplet-proposal call
#[derive(Debug, Clone, PartialEq)]
pub enum ProposeRequest {
    /// Propose triplets for one document section
    Section {
        /// Category of the section
        kind: SectionKind,
        /// Raw heading line of the section
        title: String,
        /// Section body
        content: String,
    },

    /// Propose triplets for specific topics across the whole document
    Topics {
        /// The full formatted document
        document: String,
        /// The topics to extract
        topics: Vec<String>,
    },
}

/// Structured output of one triplet-proposal call
#[derive(Debug, Clone, PartialEq)]
pub struct ProposeResponse {
    /// Candidate triplets found for the request
    pub triplets: Vec<Triplet>,

    /// Whether the service considers this response valid
    pub validation_status: bool,

    /// Summary of the proposal, or the reason it is invalid
    pub message: String,
}

/// Trait for the triplet-proposing inference service
///
/// The service is an opaque capability: it may internally be a single model,
/// a multi-stage pipeline, or a rules engine. The core only consumes its
/// final structured output.
///
/// Implemented by the infrastructure layer (resumegraph-inference)
pub trait InferenceService {
    /// Error type for inference operations
    type Error;

    /// Format and validate a raw document before extraction
    fn prepare(&self, raw_document: &str) -> Result<PreparedDocument, Self::Error>;

    /// Propose candidate triplets for a section or a topic list
    fn propose(&self, request: &ProposeRequest) -> Result<ProposeResponse, Self::Error>;
}

/// Trait for converting stored documents to text
///
/// Implemented by the infrastructure layer (resumegraph-ingest)
pub trait DocumentReader {
    /// Error type for read operations
    type Error;

    /// Read the document at `path` and return its textual content
    fn read(&self, path: &Path) -> Result<String, Self::Error>;
}
