//! Embedding provider trait and deterministic mock

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use thiserror::Error;

/// Errors that can occur during embedding generation
#[derive(Error, Debug)]
pub enum EmbeddingError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid input text
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Invalid response from the provider
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Trait for embedding providers
///
/// Providers return one vector per input text, all with the same fixed
/// dimensionality. Size compliance is the pipeline's job; providers may
/// reject oversized input.
pub trait EmbeddingProvider {
    /// Generate embeddings for a batch of texts, one vector per text
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError>;

    /// The dimension of embeddings produced by this provider
    fn dimension(&self) -> usize;

    /// The model identifier, used for token-budget lookup
    fn model_id(&self) -> &str;
}

/// Mock embedding provider for deterministic testing
///
/// Generates embeddings by hashing the input text with per-component seeds,
/// then normalizing to unit length. The embeddings are:
///
/// - **Deterministic**: same text always produces the same vector
/// - **Normalized**: unit length, for cosine similarity
/// - **Diverse**: different texts produce different vectors
pub struct MockEmbedder {
    dimension: usize,
    model_id: String,
    failure_marker: Option<String>,
    batch_calls: std::sync::Mutex<usize>,
}

impl MockEmbedder {
    /// Create a new mock embedder with the given dimension
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            model_id: "mock-embedder".to_string(),
            failure_marker: None,
            batch_calls: std::sync::Mutex::new(0),
        }
    }

    /// Number of times `embed_batch` was called
    pub fn batch_calls(&self) -> usize {
        *self.batch_calls.lock().unwrap()
    }

    /// Report a different model identifier (for token-budget tests)
    pub fn with_model_id(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = model_id.into();
        self
    }

    /// Fail on any text containing `marker` (for degradation tests)
    pub fn with_failure_marker(mut self, marker: impl Into<String>) -> Self {
        self.failure_marker = Some(marker.into());
        self
    }

    /// Hash text with a seed to get a deterministic f32 value
    fn hash_with_seed(text: &str, seed: u64) -> f32 {
        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        seed.hash(&mut hasher);
        let hash_value = hasher.finish();

        // Convert hash to float in range [-1, 1]
        let normalized = (hash_value as f64 / u64::MAX as f64) * 2.0 - 1.0;
        normalized as f32
    }

    fn embed_one(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        if text.is_empty() {
            return Err(EmbeddingError::InvalidInput(
                "Empty text cannot be embedded".to_string(),
            ));
        }
        if let Some(marker) = &self.failure_marker {
            if text.contains(marker.as_str()) {
                return Err(EmbeddingError::Communication(format!(
                    "mock failure on '{}'",
                    marker
                )));
            }
        }

        let mut embedding: Vec<f32> = (0..self.dimension)
            .map(|i| Self::hash_with_seed(text, i as u64))
            .collect();

        // Normalize to unit length for cosine similarity
        let magnitude: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        if magnitude > 0.0 {
            for value in &mut embedding {
                *value /= magnitude;
            }
        }

        Ok(embedding)
    }
}

impl EmbeddingProvider for MockEmbedder {
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        *self.batch_calls.lock().unwrap() += 1;
        texts.iter().map(|text| self.embed_one(text)).collect()
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}
