//! Core extraction orchestration

use crate::config::OrchestratorConfig;
use crate::error::ExtractError;
use crate::segment::segment;
use resumegraph_domain::traits::{InferenceService, ProposeRequest, ProposeResponse};
use resumegraph_domain::{GraphExtractionResult, Triplet};
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Drives the inference service once per document section and aggregates the
/// proposed triplets
///
/// Sections are processed strictly in document order; a single section's
/// failure contributes zero triplets and never aborts the document.
pub struct ExtractionOrchestrator<I: InferenceService> {
    inference: Arc<I>,
    config: OrchestratorConfig,
}

impl<I> ExtractionOrchestrator<I>
where
    I: InferenceService + Send + Sync + 'static,
    I::Error: std::fmt::Display,
{
    /// Create a new orchestrator
    pub fn new(inference: I, config: OrchestratorConfig) -> Self {
        Self::shared(Arc::new(inference), config)
    }

    /// Create an orchestrator over an already-shared inference service
    ///
    /// Useful when the caller also needs the service for other operations,
    /// such as document preparation.
    pub fn shared(inference: Arc<I>, config: OrchestratorConfig) -> Self {
        Self { inference, config }
    }

    /// Extract triplets from a whole formatted document
    ///
    /// Returns a completed [`GraphExtractionResult`] whose message reports
    /// per-section triplet counts and the grand total. Partial results are
    /// not a failure.
    pub async fn extract(&self, document: &str) -> Result<GraphExtractionResult, ExtractError> {
        if document.len() > self.config.max_document_chars {
            return Err(ExtractError::DocumentTooLong(
                document.len(),
                self.config.max_document_chars,
            ));
        }

        let sections = segment(document);
        info!("Extracting from {} sections", sections.len());

        let mut triplets: Vec<Triplet> = Vec::new();
        let mut section_counts: Vec<String> = Vec::new();

        for section in &sections {
            let request = ProposeRequest::Section {
                kind: section.kind,
                title: section.title.clone(),
                content: section.content.clone(),
            };

            let count = match self.propose(request).await {
                Ok(response) if response.validation_status => {
                    let count = response.triplets.len();
                    debug!("Section '{}': {} triplets", section.kind, count);
                    triplets.extend(response.triplets);
                    count
                }
                Ok(response) => {
                    warn!(
                        "Section '{}' proposal rejected: {}",
                        section.kind, response.message
                    );
                    0
                }
                Err(e) => {
                    warn!("Section '{}' extraction failed: {}", section.kind, e);
                    0
                }
            };

            section_counts.push(format!("{}: {} triplets", section.kind, count));
        }

        let message = format!(
            "{}; total: {} triplets from {} sections",
            section_counts.join("; "),
            triplets.len(),
            sections.len()
        );
        info!("Extraction complete: {}", message);

        Ok(GraphExtractionResult::new(triplets, message))
    }

    /// Extract triplets for a list of specific topics across the whole
    /// document
    ///
    /// Issues one combined inference call and returns only the triplets
    /// found for those topics (empty if none). An empty topic list makes no
    /// inference call at all.
    pub async fn extract_additional(
        &self,
        document: &str,
        topics: &[String],
    ) -> Result<Vec<Triplet>, ExtractError> {
        if topics.is_empty() {
            return Ok(Vec::new());
        }
        if document.len() > self.config.max_document_chars {
            return Err(ExtractError::DocumentTooLong(
                document.len(),
                self.config.max_document_chars,
            ));
        }

        info!("Extracting additional triplets for {} topics", topics.len());

        let request = ProposeRequest::Topics {
            document: document.to_string(),
            topics: topics.to_vec(),
        };

        let response = self.propose(request).await?;
        if !response.validation_status {
            return Err(ExtractError::Inference(response.message));
        }

        Ok(response.triplets)
    }

    /// Run one proposal call under the configured timeout
    async fn propose(&self, request: ProposeRequest) -> Result<ProposeResponse, ExtractError> {
        let inference = Arc::clone(&self.inference);

        // The inference trait is synchronous; run it off the async executor.
        let call = tokio::task::spawn_blocking(move || {
            inference
                .propose(&request)
                .map_err(|e| ExtractError::Inference(e.to_string()))
        });

        match timeout(self.config.proposal_timeout(), call).await {
            Err(_) => Err(ExtractError::Timeout),
            Ok(Err(join_error)) => Err(ExtractError::Inference(format!(
                "Task join error: {}",
                join_error
            ))),
            Ok(Ok(result)) => result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resumegraph_inference::MockInference;

    const DOCUMENT: &str = "Jane Doe\n## Experience\nEngineer at Acme.\n## Skills\nRust, SQL";

    fn orchestrator(inference: MockInference) -> ExtractionOrchestrator<MockInference> {
        ExtractionOrchestrator::new(inference, OrchestratorConfig::default())
    }

    #[tokio::test]
    async fn test_extract_aggregates_in_section_order() {
        let inference = MockInference::new();
        // header, experience, skills -- served in order
        inference.queue_triplets(vec![Triplet::new("Jane Doe", "IS_A", "Person")]);
        inference.queue_triplets(vec![Triplet::new("Jane Doe", "WORKED_AT", "Acme")]);
        inference.queue_triplets(vec![
            Triplet::new("Jane Doe", "HAS_SKILL", "Rust"),
            Triplet::new("Jane Doe", "HAS_SKILL", "SQL"),
        ]);

        let result = orchestrator(inference).extract(DOCUMENT).await.unwrap();

        assert!(result.validation_status);
        assert_eq!(result.triplet_count(), 4);
        let predicates: Vec<&str> = result.triplets.iter().map(|t| t.predicate.as_str()).collect();
        assert_eq!(predicates, vec!["IS_A", "WORKED_AT", "HAS_SKILL", "HAS_SKILL"]);
    }

    #[tokio::test]
    async fn test_extract_summary_reports_counts_and_total() {
        let inference = MockInference::new();
        inference.queue_triplets(vec![]);
        inference.queue_triplets(vec![Triplet::new("Jane Doe", "WORKED_AT", "Acme")]);

        let result = orchestrator(inference).extract(DOCUMENT).await.unwrap();

        assert!(result.validation_message.contains("header: 0 triplets"));
        assert!(result.validation_message.contains("experience: 1 triplets"));
        assert!(result.validation_message.contains("total: 1 triplets from 3 sections"));
    }

    #[tokio::test]
    async fn test_section_failure_does_not_abort_document() {
        let inference = MockInference::new();
        inference.queue_triplets(vec![Triplet::new("Jane Doe", "IS_A", "Person")]);
        inference.queue_error("model offline");
        inference.queue_triplets(vec![Triplet::new("Jane Doe", "HAS_SKILL", "Rust")]);

        let result = orchestrator(inference).extract(DOCUMENT).await.unwrap();

        // The failed experience section contributes zero triplets.
        assert!(result.validation_status);
        assert_eq!(result.triplet_count(), 2);
        assert!(result.validation_message.contains("experience: 0 triplets"));
    }

    #[tokio::test]
    async fn test_rejected_proposal_counts_as_zero() {
        use resumegraph_domain::traits::ProposeResponse;

        let inference = MockInference::new();
        inference.queue_response(ProposeResponse {
            triplets: vec![Triplet::new("a", "b", "c")],
            validation_status: false,
            message: "hallucination detected".to_string(),
        });

        let result = orchestrator(inference)
            .extract("## Skills\nRust")
            .await
            .unwrap();

        assert_eq!(result.triplet_count(), 0);
    }

    #[tokio::test]
    async fn test_extract_empty_document() {
        let result = orchestrator(MockInference::new()).extract("").await.unwrap();
        assert!(result.validation_status);
        assert_eq!(result.triplet_count(), 0);
        assert!(result.validation_message.contains("0 sections"));
    }

    #[tokio::test]
    async fn test_extract_document_too_long() {
        let inference = MockInference::new();
        let mut config = OrchestratorConfig::default();
        config.max_document_chars = 10;
        let orchestrator = ExtractionOrchestrator::new(inference, config);

        let result = orchestrator.extract("a very long document indeed").await;
        assert!(matches!(result, Err(ExtractError::DocumentTooLong(_, _))));
    }

    #[tokio::test]
    async fn test_extract_additional_returns_topic_triplets() {
        let inference = MockInference::new();
        inference.queue_triplets(vec![
            Triplet::new("Jane Doe", "VOLUNTEERED_AT", "Red Cross"),
            Triplet::new("Jane Doe", "SPEAKS", "French"),
        ]);

        let triplets = orchestrator(inference)
            .extract_additional(DOCUMENT, &["volunteer work".to_string()])
            .await
            .unwrap();

        assert_eq!(triplets.len(), 2);
    }

    #[tokio::test]
    async fn test_extract_additional_empty_topics_makes_no_call() {
        let inference = MockInference::new();
        let orchestrator = orchestrator(inference.clone());

        let triplets = orchestrator.extract_additional(DOCUMENT, &[]).await.unwrap();
        assert!(triplets.is_empty());
        assert_eq!(inference.propose_calls(), 0);
    }

    #[tokio::test]
    async fn test_extract_additional_propagates_failure() {
        let inference = MockInference::new();
        inference.queue_error("model offline");

        let result = orchestrator(inference)
            .extract_additional(DOCUMENT, &["patents".to_string()])
            .await;

        assert!(matches!(result, Err(ExtractError::Inference(_))));
    }
}
