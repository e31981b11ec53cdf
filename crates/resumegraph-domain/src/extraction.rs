//! Extraction results flowing between the orchestrator and the review loop

use crate::Triplet;

/// Aggregated outcome of extracting triplets from one document
///
/// Owned exclusively by one review session. The
/// `additional_extraction_requests` queue is cleared once processed,
/// successfully or not, so the review loop always terminates.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphExtractionResult {
    /// Extracted triplets, in document order
    pub triplets: Vec<Triplet>,

    /// Whether the extraction process completed (partial results count as
    /// completed)
    pub validation_status: bool,

    /// Human-readable summary of the extraction process
    pub validation_message: String,

    /// Pending topics the reviewer asked to extract additionally
    pub additional_extraction_requests: Vec<String>,
}

impl GraphExtractionResult {
    /// Create a completed result from triplets and a summary message
    pub fn new(triplets: Vec<Triplet>, validation_message: impl Into<String>) -> Self {
        Self {
            triplets,
            validation_status: true,
            validation_message: validation_message.into(),
            additional_extraction_requests: Vec::new(),
        }
    }

    /// Number of extracted triplets
    pub fn triplet_count(&self) -> usize {
        self.triplets.len()
    }

    /// Whether any additional extraction topics are queued
    pub fn has_pending_requests(&self) -> bool {
        !self.additional_extraction_requests.is_empty()
    }
}
