//! HTTP embedding provider
//!
//! Talks to any OpenAI-compatible `/embeddings` endpoint (OpenAI itself,
//! LiteLLM proxies, Ollama's `/v1` surface, ...).

use crate::provider::{EmbeddingError, EmbeddingProvider};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default timeout for embedding requests (60 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default number of retry attempts
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Embedding provider backed by an OpenAI-compatible embeddings API
pub struct HttpEmbedder {
    endpoint: String,
    model: String,
    api_key: Option<String>,
    dimension: usize,
    client: reqwest::Client,
    max_retries: u32,
}

/// Request body for the embeddings API
#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [&'a str],
}

/// Response from the embeddings API
#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

/// Embedding dimension for well-known models, 1536 otherwise
fn default_dimension(model: &str) -> usize {
    let model = model.to_lowercase();
    if model.contains("text-embedding-3-large") {
        3072
    } else if model.contains("nomic-embed-text") {
        768
    } else if model.contains("all-minilm") {
        384
    } else {
        1536
    }
}

impl HttpEmbedder {
    /// Create a new embedder
    ///
    /// # Parameters
    ///
    /// - `endpoint`: Base URL of the API (e.g., "https://api.openai.com/v1")
    /// - `model`: Embedding model name (e.g., "text-embedding-3-small")
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use resumegraph_embedding::HttpEmbedder;
    ///
    /// let embedder = HttpEmbedder::new("https://api.openai.com/v1", "text-embedding-3-small")
    ///     .with_api_key("sk-...");
    /// ```
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap();

        let model = model.into();
        Self {
            endpoint: endpoint.into(),
            dimension: default_dimension(&model),
            model,
            api_key: None,
            client,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Set the bearer token sent with each request
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Override the reported embedding dimension
    pub fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = dimension;
        self
    }

    /// Set the maximum number of retry attempts
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Embed a batch of texts via the API
    pub async fn embed_async(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let url = format!("{}/embeddings", self.endpoint.trim_end_matches('/'));

        let request_body = EmbeddingRequest {
            model: &self.model,
            input: texts,
        };

        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            let mut request = self.client.post(&url).json(&request_body);
            if let Some(key) = &self.api_key {
                request = request.bearer_auth(key);
            }

            match request.send().await {
                Ok(response) => {
                    if response.status().is_success() {
                        let parsed: EmbeddingResponse = response.json().await.map_err(|e| {
                            EmbeddingError::InvalidResponse(format!(
                                "Failed to parse response: {}",
                                e
                            ))
                        })?;
                        return Ok(parsed.data.into_iter().map(|d| d.embedding).collect());
                    } else {
                        let status = response.status();
                        let error_text = response
                            .text()
                            .await
                            .unwrap_or_else(|_| "Unknown error".to_string());
                        last_error = Some(EmbeddingError::Communication(format!(
                            "HTTP {}: {}",
                            status, error_text
                        )));
                    }
                }
                Err(e) => {
                    last_error = Some(EmbeddingError::Communication(format!(
                        "Request failed: {}",
                        e
                    )));
                }
            }

            attempts += 1;
            if attempts < self.max_retries {
                let delay = Duration::from_secs(2u64.pow(attempts - 1));
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_error
            .unwrap_or_else(|| EmbeddingError::Communication("Max retries exceeded".to_string())))
    }
}

impl EmbeddingProvider for HttpEmbedder {
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        // Blocking wrapper for async implementation; callers in async
        // contexts go through spawn_blocking.
        tokio::runtime::Runtime::new()
            .map_err(|e| EmbeddingError::Communication(format!("Runtime error: {}", e)))?
            .block_on(self.embed_async(texts))
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_embedder_creation() {
        let embedder = HttpEmbedder::new("https://api.openai.com/v1", "text-embedding-3-small");
        assert_eq!(embedder.model_id(), "text-embedding-3-small");
        assert_eq!(embedder.dimension(), 1536);
        assert_eq!(embedder.max_retries, DEFAULT_MAX_RETRIES);
    }

    #[test]
    fn test_default_dimensions() {
        assert_eq!(default_dimension("text-embedding-3-large"), 3072);
        assert_eq!(default_dimension("text-embedding-3-small"), 1536);
        assert_eq!(default_dimension("ollama/nomic-embed-text"), 768);
        assert_eq!(default_dimension("all-minilm"), 384);
        assert_eq!(default_dimension("unknown"), 1536);
    }

    #[test]
    fn test_dimension_override() {
        let embedder =
            HttpEmbedder::new("http://localhost:11434/v1", "custom-model").with_dimension(256);
        assert_eq!(embedder.dimension(), 256);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint() {
        let embedder = HttpEmbedder::new("http://127.0.0.1:1", "model").with_max_retries(1);
        let result = embedder.embed_async(&["test"]).await;
        assert!(matches!(result, Err(EmbeddingError::Communication(_))));
    }

    // Integration test (requires a live embeddings endpoint)
    #[tokio::test]
    #[ignore] // Only run when an endpoint is available
    async fn test_embed_integration() {
        let embedder = HttpEmbedder::new("http://localhost:11434/v1", "nomic-embed-text");
        let result = embedder.embed_async(&["hello world"]).await;
        if let Ok(vectors) = result {
            assert_eq!(vectors.len(), 1);
            assert!(!vectors[0].is_empty());
        }
    }
}
