//! End-to-end ingestion

use crate::enrich;
use crate::error::IngestError;
use crate::record::{hash_content, IngestionStatus, ResumeRecord};
use crate::store::RecordStore;
use resumegraph_domain::traits::{DocumentReader, InferenceService, PreparedDocument};
use resumegraph_domain::{GraphExtractionResult, ScopeId};
use resumegraph_embedding::{EmbeddingPipeline, EmbeddingProvider};
use resumegraph_extractor::{ExtractionOrchestrator, OrchestratorConfig};
use resumegraph_graph::{
    entities_from_triplets, EntityRecord, GraphError, GraphStore, RelationshipRecord,
    ScopeMetadata, SemanticSearchEngine, TripletMatch,
};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// What `extract_from_file` produced
#[derive(Debug)]
pub enum ExtractionOutcome {
    /// The document was already committed under this record; nothing was
    /// re-extracted
    Duplicate(ResumeRecord),

    /// A fresh extraction, ready for review and commit
    Extracted {
        /// The pending ingestion record
        record: ResumeRecord,
        /// The aggregated extraction result
        result: GraphExtractionResult,
    },
}

/// Outcome of committing an extraction to the graph
///
/// A failed graph write is reported here as `stored == false` with a reason,
/// never as a silent no-op; the caller decides whether to retry.
#[derive(Debug, Clone, PartialEq)]
pub struct CommitReport {
    /// Scope the data was (or would have been) written under
    pub scope: ScopeId,
    /// Whether the graph write succeeded
    pub stored: bool,
    /// Failure reason when `stored` is false
    pub reason: Option<String>,
    /// Number of distinct entities in the commit
    pub entity_count: usize,
    /// Number of triplets in the commit
    pub triplet_count: usize,
}

/// Drives a document from file to committed graph scope
///
/// Owns explicit handles to every collaborator: the reader, the inference
/// service (shared with the orchestrator), the embedding pipeline, the graph
/// store, and the record store.
pub struct IngestionService<R, I: InferenceService, P: EmbeddingProvider, G> {
    reader: R,
    inference: Arc<I>,
    orchestrator: ExtractionOrchestrator<I>,
    pipeline: Arc<EmbeddingPipeline<P>>,
    graph: G,
    records: RecordStore,
}

impl<R, I, P, G> IngestionService<R, I, P, G>
where
    R: DocumentReader,
    R::Error: std::fmt::Display,
    I: InferenceService + Send + Sync + 'static,
    I::Error: std::fmt::Display,
    P: EmbeddingProvider + Send + Sync + 'static,
    G: GraphStore,
{
    /// Create an ingestion service
    pub fn new(
        reader: R,
        inference: I,
        config: OrchestratorConfig,
        pipeline: EmbeddingPipeline<P>,
        graph: G,
        records: RecordStore,
    ) -> Self {
        let inference = Arc::new(inference);
        Self {
            reader,
            orchestrator: ExtractionOrchestrator::shared(Arc::clone(&inference), config),
            inference,
            pipeline: Arc::new(pipeline),
            graph,
            records,
        }
    }

    /// The graph store backing this service
    pub fn graph(&self) -> &G {
        &self.graph
    }

    /// The record store backing this service
    pub fn records(&self) -> &RecordStore {
        &self.records
    }

    /// The orchestrator, for driving review requery cycles
    pub fn orchestrator(&self) -> &ExtractionOrchestrator<I> {
        &self.orchestrator
    }

    /// The scope a record's graph data lives under
    pub fn scope_of(record: &ResumeRecord) -> Result<ScopeId, IngestError> {
        ScopeId::from_content_hash(&record.content_hash).map_err(IngestError::InvalidData)
    }

    /// Read, prepare, and extract a document
    ///
    /// A document whose content hash already has a completed record is
    /// reported as a duplicate instead of being re-extracted. A document the
    /// preparation pass rejects fails the attempt with a failed record and
    /// commits nothing.
    pub async fn extract_from_file(&mut self, path: &Path) -> Result<ExtractionOutcome, IngestError> {
        let raw = self
            .reader
            .read(path)
            .map_err(|e| IngestError::Read(e.to_string()))?;
        let content_hash = hash_content(&raw);

        if let Some(existing) = self.records.find_by_content_hash(&content_hash)? {
            if existing.status == IngestionStatus::Completed {
                info!(
                    "Content already ingested as record {}, skipping extraction",
                    existing.resume_id
                );
                return Ok(ExtractionOutcome::Duplicate(existing));
            }
        }

        let prepared = self.prepare(raw.clone()).await?;
        if !prepared.accepted {
            let mut record = ResumeRecord::from_file(path, &raw, "");
            record.status = IngestionStatus::Failed;
            record.error_message = Some(prepared.message.clone());
            self.records.upsert(&record)?;

            warn!("Document {} rejected: {}", path.display(), prepared.message);
            return Err(IngestError::DocumentRejected(prepared.message));
        }

        let result = self.orchestrator.extract(&prepared.formatted).await?;

        let record = ResumeRecord::from_file(path, &raw, &prepared.formatted);
        self.records.upsert(&record)?;
        info!(
            "Extracted {} triplets from {} as record {}",
            result.triplet_count(),
            path.display(),
            record.resume_id
        );

        Ok(ExtractionOutcome::Extracted { record, result })
    }

    /// Embed an approved extraction and commit it to the graph
    ///
    /// Entities are derived from the triplet endpoints and written first,
    /// then the relationships, then the scope metadata. A graph failure
    /// marks the record failed and yields a not-stored report; the
    /// extraction itself is never discarded.
    pub async fn commit(
        &mut self,
        record: &ResumeRecord,
        result: GraphExtractionResult,
    ) -> Result<CommitReport, IngestError> {
        let scope = Self::scope_of(record)?;
        let validation_message = result.validation_message.clone();

        // Embedding enrichment is blocking provider work.
        let pipeline = Arc::clone(&self.pipeline);
        let document = record.cleaned_content.clone();
        let mut triplets = result.triplets;
        let triplets = tokio::task::spawn_blocking(move || {
            enrich::embed_triplets(pipeline.as_ref(), &mut triplets, &document);
            triplets
        })
        .await
        .map_err(|e| IngestError::Task(e.to_string()))?;

        let entities = entities_from_triplets(&triplets);
        let relationships: Vec<RelationshipRecord> = triplets
            .iter()
            .map(RelationshipRecord::from_triplet)
            .collect();
        let metadata = ScopeMetadata {
            entity_count: entities.len(),
            triplet_count: relationships.len(),
            validation_message,
        };

        match Self::write_graph(&self.graph, &scope, &entities, &relationships, &metadata).await {
            Ok(()) => {
                self.records.mark_completed(&record.resume_id)?;
                info!(
                    "Committed {} entities and {} triplets under scope {}",
                    entities.len(),
                    relationships.len(),
                    scope
                );
                Ok(CommitReport {
                    scope,
                    stored: true,
                    reason: None,
                    entity_count: entities.len(),
                    triplet_count: relationships.len(),
                })
            }
            Err(e) => {
                let reason = e.to_string();
                warn!("Graph commit failed for record {}: {}", record.resume_id, reason);
                self.records.mark_failed(&record.resume_id, &reason)?;
                Ok(CommitReport {
                    scope,
                    stored: false,
                    reason: Some(reason),
                    entity_count: entities.len(),
                    triplet_count: relationships.len(),
                })
            }
        }
    }

    /// Remove a resume's graph scope and its record; returns whether the
    /// record existed
    pub async fn delete(&mut self, resume_id: &str) -> Result<bool, IngestError> {
        let Some(record) = self.records.find_by_id(resume_id)? else {
            return Ok(false);
        };

        let scope = Self::scope_of(&record)?;
        self.graph.delete_scope(&scope).await?;
        self.records.delete(resume_id)?;
        info!("Deleted record {} and scope {}", resume_id, scope);

        Ok(true)
    }

    /// Rank stored triplets against a natural-language query
    ///
    /// The query is embedded with the same pipeline used at commit time, so
    /// query and stored vectors share one model. `scope` of `None` searches
    /// across all resumes.
    pub async fn search_triplets(
        &self,
        query: &str,
        scope: Option<&ScopeId>,
        top_k: usize,
    ) -> Result<Vec<TripletMatch>, IngestError> {
        let pipeline = Arc::clone(&self.pipeline);
        let query_text = query.to_string();
        let vector = tokio::task::spawn_blocking(move || pipeline.embed(&query_text))
            .await
            .map_err(|e| IngestError::Task(e.to_string()))?;

        let engine = SemanticSearchEngine::new(&self.graph);
        Ok(engine.search_triplets(scope, &vector, top_k).await?)
    }

    /// Run the preparation pass off the async executor
    async fn prepare(&self, raw: String) -> Result<PreparedDocument, IngestError> {
        let inference = Arc::clone(&self.inference);
        tokio::task::spawn_blocking(move || {
            inference.prepare(&raw).map_err(|e| e.to_string())
        })
        .await
        .map_err(|e| IngestError::Task(e.to_string()))?
        .map_err(IngestError::Preparation)
    }

    async fn write_graph(
        graph: &G,
        scope: &ScopeId,
        entities: &[EntityRecord],
        relationships: &[RelationshipRecord],
        metadata: &ScopeMetadata,
    ) -> Result<(), GraphError> {
        graph.upsert_entities(scope, entities).await?;
        graph.upsert_relationships(scope, relationships).await?;
        graph.write_scope_metadata(scope, metadata).await
    }
}
