//! Chunk-and-average embedding pipeline

use crate::budget;
use crate::chunk::chunk_text;
use crate::provider::EmbeddingProvider;
use tracing::{debug, warn};

/// Converts text into fixed-width vectors, transparently chunking oversized
/// input and averaging the chunk vectors
///
/// The pipeline never fails: provider errors degrade to averaging over fewer
/// chunks, or to the empty-vector sentinel when nothing could be embedded.
/// An empty return value means "no embedding available", not an error.
pub struct EmbeddingPipeline<P: EmbeddingProvider> {
    provider: P,
}

impl<P: EmbeddingProvider> EmbeddingPipeline<P> {
    /// Create a pipeline over the given provider
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Access the underlying provider
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Dimension of the vectors this pipeline produces
    pub fn dimension(&self) -> usize {
        self.provider.dimension()
    }

    /// Maximum character count sent to the provider in one call, derived
    /// from the model's token budget with the safety margin applied
    pub fn safe_char_budget(&self) -> usize {
        budget::safe_char_budget(self.provider.model_id())
    }

    /// Whether `text` exceeds the safe budget and will be chunked
    pub fn needs_chunking(&self, text: &str) -> bool {
        text.chars().count() > self.safe_char_budget()
    }

    /// Embed one text
    ///
    /// Oversized input is split at sentence boundaries and the chunk vectors
    /// are averaged dimension-wise. Returns the empty vector when no chunk
    /// could be embedded.
    pub fn embed(&self, text: &str) -> Vec<f32> {
        if !self.needs_chunking(text) {
            return match self.provider.embed_batch(&[text]) {
                Ok(mut vectors) if !vectors.is_empty() => vectors.swap_remove(0),
                Ok(_) => {
                    warn!("Provider returned no vector for text");
                    Vec::new()
                }
                Err(e) => {
                    warn!("Embedding failed: {}", e);
                    Vec::new()
                }
            };
        }

        let chunks = chunk_text(text, self.safe_char_budget());
        debug!("Text of {} chars split into {} chunks", text.len(), chunks.len());

        let mut vectors = Vec::new();
        for (idx, chunk) in chunks.into_iter().enumerate() {
            match self.provider.embed_batch(&[chunk]) {
                Ok(mut chunk_vectors) if !chunk_vectors.is_empty() => {
                    vectors.push(chunk_vectors.swap_remove(0));
                }
                Ok(_) => warn!("Chunk {} returned no vector, skipping", idx),
                Err(e) => warn!("Chunk {} failed, skipping: {}", idx, e),
            }
        }

        mean_of(vectors)
    }

    /// Embed several texts
    ///
    /// Uses one provider batch call when every text fits the safe budget;
    /// if any text is oversized, the whole batch falls back to sequential
    /// per-text processing to avoid partial-batch ambiguity.
    pub fn embed_batch(&self, texts: &[&str]) -> Vec<Vec<f32>> {
        if texts.is_empty() {
            return Vec::new();
        }

        if texts.iter().any(|text| self.needs_chunking(text)) {
            debug!("Batch contains oversized text, processing per-text");
            return texts.iter().map(|text| self.embed(text)).collect();
        }

        match self.provider.embed_batch(texts) {
            Ok(vectors) if vectors.len() == texts.len() => vectors,
            Ok(vectors) => {
                warn!(
                    "Provider returned {} vectors for {} texts",
                    vectors.len(),
                    texts.len()
                );
                vec![Vec::new(); texts.len()]
            }
            Err(e) => {
                warn!("Batch embedding failed: {}", e);
                vec![Vec::new(); texts.len()]
            }
        }
    }
}

/// Dimension-wise arithmetic mean of the given vectors
///
/// Returns the empty vector for empty input. Vectors whose dimension does
/// not match the first one are skipped.
fn mean_of(vectors: Vec<Vec<f32>>) -> Vec<f32> {
    let Some(first) = vectors.first() else {
        return Vec::new();
    };
    let dimension = first.len();

    let mut sums = vec![0.0f64; dimension];
    let mut count = 0usize;

    for vector in &vectors {
        if vector.len() != dimension {
            warn!(
                "Skipping vector of dimension {} (expected {})",
                vector.len(),
                dimension
            );
            continue;
        }
        for (sum, value) in sums.iter_mut().zip(vector) {
            *sum += f64::from(*value);
        }
        count += 1;
    }

    sums.into_iter()
        .map(|sum| (sum / count as f64) as f32)
        .collect()
}
