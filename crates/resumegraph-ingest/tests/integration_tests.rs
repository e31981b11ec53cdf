//! Integration tests for resumegraph-ingest
//!
//! Drive the full pipeline over the in-process collaborators: text reader,
//! mock inference, mock embedder, memory graph store, and a temporary SQLite
//! record database.

use resumegraph_domain::Triplet;
use resumegraph_embedding::{EmbeddingPipeline, MockEmbedder};
use resumegraph_extractor::OrchestratorConfig;
use resumegraph_graph::{GraphStore, MemoryStore};
use resumegraph_inference::MockInference;
use resumegraph_ingest::{
    CommitReport, ExtractionOutcome, IngestError, IngestionService, IngestionStatus, RecordStore,
    TextFileReader,
};
use resumegraph_review::{ReviewAction, ReviewSession, ReviewState};
use std::path::PathBuf;

const RESUME: &str = "Jane Doe\njane@example.com\n\n## Experience\nSenior Engineer at Acme.\n\n## Skills\nRust, SQL\n";

type TestService = IngestionService<TextFileReader, MockInference, MockEmbedder, MemoryStore>;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn service(inference: MockInference) -> TestService {
    IngestionService::new(
        TextFileReader::new(),
        inference,
        OrchestratorConfig::default(),
        EmbeddingPipeline::new(MockEmbedder::new(8)),
        MemoryStore::new(),
        RecordStore::open(":memory:").unwrap(),
    )
}

fn write_resume(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

/// Queue one proposal per section of [`RESUME`] (header, experience, skills)
fn queue_resume_proposals(inference: &MockInference) {
    inference.queue_triplets(vec![
        Triplet::new("Jane Doe", "IS_A", "Person").with_types("PERSON", "CATEGORY")
    ]);
    inference.queue_triplets(vec![Triplet::new("Jane Doe", "WORKED_AT", "Acme")
        .with_types("PERSON", "COMPANY")
        .with_descriptions("An engineer", "A company", "Senior role")]);
    inference.queue_triplets(vec![
        Triplet::new("Jane Doe", "HAS_SKILL", "Rust").with_types("PERSON", "SKILL"),
        Triplet::new("Jane Doe", "HAS_SKILL", "SQL").with_types("PERSON", "SKILL"),
    ]);
}

async fn extract(svc: &mut TestService, path: &std::path::Path) -> ExtractionOutcome {
    svc.extract_from_file(path).await.unwrap()
}

#[tokio::test]
async fn test_full_pipeline_extract_review_commit() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let path = write_resume(&dir, "jane.md", RESUME);

    let inference = MockInference::new();
    queue_resume_proposals(&inference);
    let mut svc = service(inference);

    let ExtractionOutcome::Extracted { record, result } = extract(&mut svc, &path).await else {
        panic!("expected a fresh extraction");
    };
    assert_eq!(record.status, IngestionStatus::Pending);
    assert_eq!(result.triplet_count(), 4);

    // Human review approves the set unchanged.
    let mut session = ReviewSession::new(result);
    assert_eq!(session.apply(ReviewAction::Approve).unwrap(), ReviewState::Approved);
    let approved = session.into_result().unwrap();

    let report = svc.commit(&record, approved).await.unwrap();
    assert!(report.stored);
    assert_eq!(report.triplet_count, 4);
    // Jane Doe, Person, Acme, Rust, SQL
    assert_eq!(report.entity_count, 5);

    // Graph state: entities, edges, and metadata all under the scope.
    let entities = svc.graph().entities(Some(&report.scope), None).await.unwrap();
    assert_eq!(entities.len(), 5);
    let relationships = svc.graph().relationships(Some(&report.scope)).await.unwrap();
    assert_eq!(relationships.len(), 4);
    assert!(relationships.iter().all(|r| r.embedding.is_some()));

    let metadata = svc.graph().scope_metadata(&report.scope).await.unwrap().unwrap();
    assert_eq!(metadata.entity_count, 5);
    assert_eq!(metadata.triplet_count, 4);

    // Record state: completed and flagged as graph-ingested.
    let stored = svc.records().find_by_id(&record.resume_id).unwrap().unwrap();
    assert_eq!(stored.status, IngestionStatus::Completed);
    assert!(stored.graph_ingested);
}

#[tokio::test]
async fn test_reingesting_identical_content_is_detected() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_resume(&dir, "jane.md", RESUME);

    let inference = MockInference::new();
    queue_resume_proposals(&inference);
    let mut svc = service(inference.clone());

    let ExtractionOutcome::Extracted { record, result } = extract(&mut svc, &path).await else {
        panic!("expected a fresh extraction");
    };
    svc.commit(&record, result).await.unwrap();
    let calls_after_first = inference.propose_calls();

    // Same bytes at a different path: detected by content hash, no new
    // extraction, no new record.
    let other_path = write_resume(&dir, "copy.md", RESUME);
    let outcome = extract(&mut svc, &other_path).await;
    assert!(matches!(outcome, ExtractionOutcome::Duplicate(r) if r.resume_id == record.resume_id));
    assert_eq!(inference.propose_calls(), calls_after_first);
    assert_eq!(svc.records().count(None).unwrap(), 1);
}

#[tokio::test]
async fn test_uncommitted_extraction_is_not_a_duplicate() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_resume(&dir, "jane.md", RESUME);

    let mut svc = service(MockInference::new());

    let first = extract(&mut svc, &path).await;
    assert!(matches!(first, ExtractionOutcome::Extracted { .. }));

    // The record is still pending, so the document is extracted again.
    let second = extract(&mut svc, &path).await;
    assert!(matches!(second, ExtractionOutcome::Extracted { .. }));
}

#[tokio::test]
async fn test_rejected_document_fails_without_committing() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_resume(&dir, "not-a-resume.txt", "lorem ipsum dolor");

    let mut svc = service(MockInference::rejecting("not a resume"));

    let error = svc.extract_from_file(&path).await.unwrap_err();
    assert!(matches!(error, IngestError::DocumentRejected(ref m) if m == "not a resume"));

    // The failure is recorded; the graph is untouched.
    let records = svc.records().list(Some(IngestionStatus::Failed)).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].error_message.as_deref(), Some("not a resume"));
    assert!(svc.graph().entities(None, None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_graph_outage_reports_not_stored_and_marks_failed() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_resume(&dir, "jane.md", RESUME);

    let inference = MockInference::new();
    queue_resume_proposals(&inference);
    let mut svc = service(inference);

    let ExtractionOutcome::Extracted { record, result } = extract(&mut svc, &path).await else {
        panic!("expected a fresh extraction");
    };

    svc.graph().set_fail_writes(true);
    let report = svc.commit(&record, result.clone()).await.unwrap();
    assert!(!report.stored);
    assert!(report.reason.is_some());

    let stored = svc.records().find_by_id(&record.resume_id).unwrap().unwrap();
    assert_eq!(stored.status, IngestionStatus::Failed);

    // The extraction was not discarded: the caller can retry the commit.
    svc.graph().set_fail_writes(false);
    let retry: CommitReport = svc.commit(&record, result).await.unwrap();
    assert!(retry.stored);
    assert_eq!(
        svc.records().find_by_id(&record.resume_id).unwrap().unwrap().status,
        IngestionStatus::Completed
    );
}

#[tokio::test]
async fn test_delete_removes_scope_and_record_only() {
    let dir = tempfile::tempdir().unwrap();

    let inference = MockInference::new();
    queue_resume_proposals(&inference);
    queue_resume_proposals(&inference);
    let mut svc = service(inference);

    let jane_path = write_resume(&dir, "jane.md", RESUME);
    let ExtractionOutcome::Extracted { record: jane, result } = extract(&mut svc, &jane_path).await
    else {
        panic!("expected a fresh extraction");
    };
    let jane_report = svc.commit(&jane, result).await.unwrap();

    let bob_path = write_resume(&dir, "bob.md", &RESUME.replace("Jane Doe", "Bob Ray"));
    let ExtractionOutcome::Extracted { record: bob, result } = extract(&mut svc, &bob_path).await
    else {
        panic!("expected a fresh extraction");
    };
    let bob_report = svc.commit(&bob, result).await.unwrap();

    assert!(svc.delete(&jane.resume_id).await.unwrap());

    // Jane's scope and record are gone; Bob's are untouched.
    assert!(svc.graph().entities(Some(&jane_report.scope), None).await.unwrap().is_empty());
    assert!(svc.graph().relationships(Some(&jane_report.scope)).await.unwrap().is_empty());
    assert!(svc.records().find_by_id(&jane.resume_id).unwrap().is_none());

    assert!(!svc.graph().entities(Some(&bob_report.scope), None).await.unwrap().is_empty());
    assert!(svc.records().find_by_id(&bob.resume_id).unwrap().is_some());

    // Deleting again reports nothing to delete.
    assert!(!svc.delete(&jane.resume_id).await.unwrap());
}

#[tokio::test]
async fn test_search_ranks_committed_triplets() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_resume(&dir, "jane.md", RESUME);

    let inference = MockInference::new();
    queue_resume_proposals(&inference);
    let mut svc = service(inference);

    let ExtractionOutcome::Extracted { record, result } = extract(&mut svc, &path).await else {
        panic!("expected a fresh extraction");
    };
    let report = svc.commit(&record, result).await.unwrap();

    let matches = svc
        .search_triplets("What does Jane do?", Some(&report.scope), 3)
        .await
        .unwrap();

    assert_eq!(matches.len(), 3);
    // Descending by score, all scores are valid cosine values.
    assert!(matches.windows(2).all(|w| w[0].similarity >= w[1].similarity));
    assert!(matches.iter().all(|m| m.similarity.abs() <= 1.0 + 1e-6));
}

#[tokio::test]
async fn test_review_requery_feeds_committed_set() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_resume(&dir, "jane.md", RESUME);

    let inference = MockInference::new();
    queue_resume_proposals(&inference);
    // Served later, for the requery.
    let mut svc = service(inference.clone());

    let ExtractionOutcome::Extracted { record, result } = extract(&mut svc, &path).await else {
        panic!("expected a fresh extraction");
    };

    let mut session = ReviewSession::new(result);
    session
        .apply(ReviewAction::AddRequest("volunteer work".to_string()))
        .unwrap();
    assert_eq!(session.apply(ReviewAction::Approve).unwrap(), ReviewState::AwaitingRequery);

    inference.queue_triplets(vec![Triplet::new("Jane Doe", "VOLUNTEERED_AT", "Red Cross")
        .with_types("PERSON", "ORGANIZATION")]);
    let outcome = session
        .run_requery(svc.orchestrator(), &record.cleaned_content)
        .await
        .unwrap();
    assert_eq!(outcome.added, 1);

    assert_eq!(session.apply(ReviewAction::Approve).unwrap(), ReviewState::Approved);
    let approved = session.into_result().unwrap();
    assert_eq!(approved.triplet_count(), 5);

    let report = svc.commit(&record, approved).await.unwrap();
    assert!(report.stored);
    let relationships = svc.graph().relationships(Some(&report.scope)).await.unwrap();
    assert!(relationships.iter().any(|r| r.predicate == "VOLUNTEERED_AT"));
}
