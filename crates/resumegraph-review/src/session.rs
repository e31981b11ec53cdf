//! The interactive review session

use resumegraph_domain::traits::InferenceService;
use resumegraph_domain::{dedupe, GraphExtractionResult, Triplet};
use resumegraph_extractor::ExtractionOrchestrator;
use thiserror::Error;
use tracing::{info, warn};

/// States of a review session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewState {
    /// Triplets are presented for review; all actions are available
    Presented,
    /// An approval is deferred until queued additional requests are
    /// processed
    AwaitingRequery,
    /// The triplet set is frozen for downstream embedding and storage
    /// (terminal)
    Approved,
    /// The session was discarded without persisting anything (terminal)
    Cancelled,
}

/// Actions a reviewer can take from `Presented`
#[derive(Debug, Clone, PartialEq)]
pub enum ReviewAction {
    /// Approve the current set; defers to a requery cycle while additional
    /// requests are queued
    Approve,
    /// Queue a free-text topic for additional extraction
    AddRequest(String),
    /// Remove the triplets at the given 1-based indices; out-of-range
    /// indices are ignored
    Remove(Vec<usize>),
    /// Cancel the session; a no-op unless `confirmed`
    Cancel {
        /// Explicit confirmation, required for the transition to happen
        confirmed: bool,
    },
}

/// Errors reported by review actions
///
/// Errors never mutate session state; the reviewer can retry.
#[derive(Error, Debug)]
pub enum ReviewError {
    /// The action is not valid in the session's current state
    #[error("Action not valid in state {0:?}")]
    InvalidAction(ReviewState),

    /// An additional extraction topic was empty
    #[error("Additional extraction topic cannot be empty")]
    EmptyRequest,
}

/// Outcome of one requery cycle
#[derive(Debug, Clone, PartialEq)]
pub struct RequeryOutcome {
    /// How many unique new triplets were merged into the set
    pub added: usize,
    /// The extraction failure, if the cycle failed (the queue is cleared
    /// either way)
    pub error: Option<String>,
}

/// One interactive review of one extraction result
///
/// The session exclusively owns its [`GraphExtractionResult`]; the result
/// is only released by [`ReviewSession::into_result`], and only when the
/// session was approved.
#[derive(Debug)]
pub struct ReviewSession {
    result: GraphExtractionResult,
    state: ReviewState,
}

impl ReviewSession {
    /// Open a session presenting the given extraction result
    pub fn new(result: GraphExtractionResult) -> Self {
        Self {
            result,
            state: ReviewState::Presented,
        }
    }

    /// Current state of the session
    pub fn state(&self) -> ReviewState {
        self.state
    }

    /// The current ordered triplet set
    pub fn triplets(&self) -> &[Triplet] {
        &self.result.triplets
    }

    /// Topics queued for additional extraction
    pub fn pending_requests(&self) -> &[String] {
        &self.result.additional_extraction_requests
    }

    /// Apply one reviewer action
    ///
    /// Returns the state after the transition. Invalid actions error
    /// without changing anything.
    pub fn apply(&mut self, action: ReviewAction) -> Result<ReviewState, ReviewError> {
        if self.state != ReviewState::Presented {
            return Err(ReviewError::InvalidAction(self.state));
        }

        match action {
            ReviewAction::Approve => {
                if self.result.has_pending_requests() {
                    self.state = ReviewState::AwaitingRequery;
                } else {
                    info!("Review approved with {} triplets", self.result.triplet_count());
                    self.state = ReviewState::Approved;
                }
            }
            ReviewAction::AddRequest(topic) => {
                let topic = topic.trim().to_string();
                if topic.is_empty() {
                    return Err(ReviewError::EmptyRequest);
                }
                self.result.additional_extraction_requests.push(topic);
            }
            ReviewAction::Remove(indices) => {
                self.remove_indices(indices);
            }
            ReviewAction::Cancel { confirmed: true } => {
                info!("Review cancelled, discarding {} triplets", self.result.triplet_count());
                self.state = ReviewState::Cancelled;
            }
            ReviewAction::Cancel { confirmed: false } => {
                // Cancellation requires explicit confirmation.
            }
        }

        Ok(self.state)
    }

    /// Process the queued additional requests
    ///
    /// Only valid in `AwaitingRequery`. Runs one combined extraction for the
    /// queued topics, merges the unique new triplets (deduplicated against
    /// every current signature), and returns to `Presented`. The queue is
    /// cleared even when extraction fails, so the same requests can never
    /// re-trigger.
    pub async fn run_requery<I>(
        &mut self,
        orchestrator: &ExtractionOrchestrator<I>,
        document: &str,
    ) -> Result<RequeryOutcome, ReviewError>
    where
        I: InferenceService + Send + Sync + 'static,
        I::Error: std::fmt::Display,
    {
        if self.state != ReviewState::AwaitingRequery {
            return Err(ReviewError::InvalidAction(self.state));
        }

        let topics: Vec<String> = std::mem::take(&mut self.result.additional_extraction_requests);

        let outcome = match orchestrator.extract_additional(document, &topics).await {
            Ok(candidates) => {
                let unique = dedupe::dedupe(&self.result.triplets, candidates);
                let added = unique.len();
                info!("Requery for {} topics added {} triplets", topics.len(), added);
                self.result.triplets.extend(unique);
                RequeryOutcome { added, error: None }
            }
            Err(e) => {
                warn!("Requery failed, requests dropped: {}", e);
                RequeryOutcome {
                    added: 0,
                    error: Some(e.to_string()),
                }
            }
        };

        self.state = ReviewState::Presented;
        Ok(outcome)
    }

    /// Consume the session, releasing the result only if it was approved
    pub fn into_result(self) -> Option<GraphExtractionResult> {
        match self.state {
            ReviewState::Approved => Some(self.result),
            _ => None,
        }
    }

    /// Remove the triplets at the given 1-based indices
    ///
    /// Indices are deduplicated and removed in descending order, so the
    /// remaining positions stay valid during removal. Out-of-range indices
    /// are ignored.
    fn remove_indices(&mut self, mut indices: Vec<usize>) {
        indices.sort_unstable();
        indices.dedup();

        for index in indices.into_iter().rev() {
            if index >= 1 && index <= self.result.triplets.len() {
                let removed = self.result.triplets.remove(index - 1);
                info!("Removed triplet {}: {} {} {}", index, removed.subject, removed.predicate, removed.object);
            } else {
                warn!("Ignoring out-of-range removal index {}", index);
            }
        }
    }
}
