//! Embedding enrichment of approved triplets
//!
//! Each triplet gets three embeddings (subject, object, relationship), each
//! computed over a composed text block that includes a short document prefix
//! for context. Enrichment never fails: an embedding the provider could not
//! produce is simply left unset.

use resumegraph_domain::Triplet;
use resumegraph_embedding::{EmbeddingPipeline, EmbeddingProvider};
use tracing::debug;

/// How much of the document is prepended to every embedded text as context
const CONTEXT_CHARS: usize = 500;

/// Fill the three embedding fields of every triplet
///
/// All texts are composed first and embedded as one batch. Embeddings that
/// come back as the empty sentinel are stored as `None`.
pub fn embed_triplets<P: EmbeddingProvider>(
    pipeline: &EmbeddingPipeline<P>,
    triplets: &mut [Triplet],
    document: &str,
) {
    if triplets.is_empty() {
        return;
    }

    let context = context_prefix(document);
    let texts: Vec<String> = triplets
        .iter()
        .flat_map(|triplet| {
            [
                entity_text(
                    &triplet.subject,
                    &triplet.subject_type,
                    &triplet.subject_description,
                    context,
                ),
                entity_text(
                    &triplet.object,
                    &triplet.object_type,
                    &triplet.object_description,
                    context,
                ),
                relationship_text(triplet, context),
            ]
        })
        .collect();

    debug!("Embedding {} texts for {} triplets", texts.len(), triplets.len());
    let text_refs: Vec<&str> = texts.iter().map(String::as_str).collect();
    let vectors = pipeline.embed_batch(&text_refs);

    for (triplet, chunk) in triplets.iter_mut().zip(vectors.chunks_exact(3)) {
        triplet.subject_embedding = non_empty(&chunk[0]);
        triplet.object_embedding = non_empty(&chunk[1]);
        triplet.relationship_embedding = non_empty(&chunk[2]);
    }
}

/// The document's first [`CONTEXT_CHARS`] characters, cut on a char boundary
fn context_prefix(document: &str) -> &str {
    match document.char_indices().nth(CONTEXT_CHARS) {
        Some((byte_index, _)) => &document[..byte_index],
        None => document,
    }
}

fn entity_text(name: &str, entity_type: &str, description: &str, context: &str) -> String {
    format!(
        "Entity: {}\nType: {}\nDescription: {}\nContext: {}",
        name, entity_type, description, context
    )
}

fn relationship_text(triplet: &Triplet, context: &str) -> String {
    format!(
        "Relationship: {}\nSubject: {} ({})\nObject: {} ({})\nDescription: {}\nContext: {}",
        triplet.predicate,
        triplet.subject,
        triplet.subject_type,
        triplet.object,
        triplet.object_type,
        triplet.relationship_description,
        context
    )
}

/// The empty-vector sentinel means "no embedding available"
fn non_empty(vector: &[f32]) -> Option<Vec<f32>> {
    if vector.is_empty() {
        None
    } else {
        Some(vector.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resumegraph_embedding::MockEmbedder;

    fn triplet() -> Triplet {
        Triplet::new("Alice", "WORKED_AT", "Acme")
            .with_types("PERSON", "COMPANY")
            .with_descriptions("An engineer", "A company", "2019 to 2024")
    }

    #[test]
    fn test_all_three_embeddings_filled() {
        let pipeline = EmbeddingPipeline::new(MockEmbedder::new(8));
        let mut triplets = vec![triplet()];

        embed_triplets(&pipeline, &mut triplets, "# Jane Doe resume");

        assert!(triplets[0].is_embedded());
        assert_eq!(triplets[0].subject_embedding.as_ref().unwrap().len(), 8);
        // Subject and object texts differ, so their vectors do too.
        assert_ne!(triplets[0].subject_embedding, triplets[0].object_embedding);
    }

    #[test]
    fn test_enrichment_is_deterministic() {
        let pipeline = EmbeddingPipeline::new(MockEmbedder::new(8));
        let mut a = vec![triplet()];
        let mut b = vec![triplet()];

        embed_triplets(&pipeline, &mut a, "resume");
        embed_triplets(&pipeline, &mut b, "resume");

        assert_eq!(a, b);
    }

    #[test]
    fn test_failed_batch_leaves_embeddings_unset() {
        // One poisoned text fails the whole provider batch; every embedding
        // comes back as the sentinel and stays None.
        let provider = MockEmbedder::new(8).with_failure_marker("Alice");
        let pipeline = EmbeddingPipeline::new(provider);
        let mut triplets = vec![triplet()];

        embed_triplets(&pipeline, &mut triplets, "resume");

        assert!(triplets[0].subject_embedding.is_none());
        assert!(triplets[0].object_embedding.is_none());
        assert!(triplets[0].relationship_embedding.is_none());
    }

    #[test]
    fn test_empty_triplet_list_makes_no_calls() {
        let pipeline = EmbeddingPipeline::new(MockEmbedder::new(8));
        let mut triplets: Vec<Triplet> = Vec::new();

        embed_triplets(&pipeline, &mut triplets, "resume");

        assert_eq!(pipeline.provider().batch_calls(), 0);
    }

    #[test]
    fn test_context_prefix_respects_char_boundaries() {
        // Multibyte characters near the cutoff must not split.
        let document = "é".repeat(CONTEXT_CHARS + 50);
        let prefix = context_prefix(&document);
        assert_eq!(prefix.chars().count(), CONTEXT_CHARS);
    }

    #[test]
    fn test_short_document_is_whole_context() {
        assert_eq!(context_prefix("short"), "short");
    }
}
