//! Chat-completions inference implementation
//!
//! Talks to any OpenAI-compatible chat-completions endpoint (OpenAI itself,
//! LiteLLM proxies, Ollama's `/v1` surface, vLLM, ...).
//!
//! # Features
//!
//! - Async HTTP communication with the completions API
//! - Configurable endpoint, model, and API key
//! - Retry logic with exponential backoff
//! - Timeout handling

use crate::parser::parse_triplets;
use crate::prompt;
use crate::InferenceError;
use resumegraph_domain::traits::{
    InferenceService, PreparedDocument, ProposeRequest, ProposeResponse,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default timeout for completion requests (2 minutes)
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Default number of retry attempts
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Inference service backed by an OpenAI-compatible chat-completions API
pub struct ChatInference {
    endpoint: String,
    model: String,
    api_key: Option<String>,
    client: reqwest::Client,
    max_retries: u32,
}

/// Request body for the chat completions API
#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

/// Response from the chat completions API
#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

impl ChatInference {
    /// Create a new chat inference service
    ///
    /// # Parameters
    ///
    /// - `endpoint`: Base URL of the API (e.g., "https://api.openai.com/v1")
    /// - `model`: Model to use (e.g., "gpt-4o-mini")
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use resumegraph_inference::ChatInference;
    ///
    /// let service = ChatInference::new("https://api.openai.com/v1", "gpt-4o-mini")
    ///     .with_api_key("sk-...");
    /// ```
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap();

        Self {
            endpoint: endpoint.into(),
            model: model.into(),
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

    /// Set the maximum number of retry attempts
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Send one completion request and return the model's text
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The endpoint is unreachable
    /// - The model is not available
    /// - The response format is invalid
    pub async fn complete(&self, prompt: &str) -> Result<String, InferenceError> {
        let url = format!("{}/chat/completions", self.endpoint.trim_end_matches('/'));

        let request_body = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user",
                content: prompt.to_string(),
            }],
            temperature: 0.0,
        };

        // Retry logic with exponential backoff
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
                        let parsed: ChatCompletionResponse =
                            response.json().await.map_err(|e| {
                                InferenceError::InvalidResponse(format!(
                                    "Failed to parse response: {}",
                                    e
                                ))
                            })?;

                        return parsed
                            .choices
                            .into_iter()
                            .next()
                            .map(|choice| choice.message.content)
                            .ok_or_else(|| {
                                InferenceError::InvalidResponse("No choices returned".to_string())
                            });
                    } else if response.status() == reqwest::StatusCode::NOT_FOUND {
                        return Err(InferenceError::ModelNotAvailable(self.model.clone()));
                    } else {
                        let status = response.status();
                        let error_text = response
                            .text()
                            .await
                            .unwrap_or_else(|_| "Unknown error".to_string());
                        last_error = Some(InferenceError::Communication(format!(
                            "HTTP {}: {}",
                            status, error_text
                        )));
                    }
                }
                Err(e) => {
                    last_error = Some(InferenceError::Communication(format!(
                        "Request failed: {}",
                        e
                    )));
                }
            }

            attempts += 1;
            if attempts < self.max_retries {
                // Exponential backoff: 1s, 2s, 4s, etc.
                let delay = Duration::from_secs(2u64.pow(attempts - 1));
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_error
            .unwrap_or_else(|| InferenceError::Communication("Max retries exceeded".to_string())))
    }

    async fn prepare_async(&self, raw_document: &str) -> Result<PreparedDocument, InferenceError> {
        let prompt = prompt::build_prepare_prompt(raw_document);
        debug!("Preparation prompt length: {} chars", prompt.len());

        let formatted = self.complete(&prompt).await?;
        let accepted = !formatted.trim().is_empty();

        Ok(PreparedDocument {
            message: if accepted {
                format!("formatted document ({} chars)", formatted.len())
            } else {
                "model returned an empty document".to_string()
            },
            formatted,
            accepted,
        })
    }

    async fn propose_async(
        &self,
        request: &ProposeRequest,
    ) -> Result<ProposeResponse, InferenceError> {
        let prompt = match request {
            ProposeRequest::Section {
                kind,
                title,
                content,
            } => prompt::build_section_prompt(*kind, title, content),
            ProposeRequest::Topics { document, topics } => {
                prompt::build_topics_prompt(document, topics)
            }
        };
        debug!("Proposal prompt length: {} chars", prompt.len());

        let response = self.complete(&prompt).await?;
        let triplets = parse_triplets(&response)?;

        Ok(ProposeResponse {
            message: format!("proposed {} triplets", triplets.len()),
            validation_status: true,
            triplets,
        })
    }

    fn block_on<F, T>(&self, future: F) -> Result<T, InferenceError>
    where
        F: std::future::Future<Output = Result<T, InferenceError>>,
    {
        tokio::runtime::Runtime::new()
            .map_err(|e| InferenceError::Other(format!("Runtime error: {}", e)))?
            .block_on(future)
    }
}

impl InferenceService for ChatInference {
    type Error = InferenceError;

    fn prepare(&self, raw_document: &str) -> Result<PreparedDocument, Self::Error> {
        // Blocking wrapper for async implementation; callers in async
        // contexts go through spawn_blocking.
        self.block_on(self.prepare_async(raw_document))
    }

    fn propose(&self, request: &ProposeRequest) -> Result<ProposeResponse, Self::Error> {
        self.block_on(self.propose_async(request))
    }
}
