//! resumegraph Embedding Layer
//!
//! Converts text into fixed-width vectors for semantic search, transparently
//! chunking input that exceeds the provider's token budget and averaging the
//! chunk vectors.
//!
//! # Architecture
//!
//! - **EmbeddingProvider**: trait over concrete embedding backends
//! - **MockEmbedder**: hash-based deterministic embeddings for testing
//! - **HttpEmbedder**: OpenAI-compatible embeddings API
//! - **EmbeddingPipeline**: token-budget sizing, sentence-aware chunking,
//!   dimension-wise averaging, empty-vector sentinel on total failure
//!
//! # Examples
//!
//! ```
//! use resumegraph_embedding::{EmbeddingPipeline, MockEmbedder};
//!
//! let pipeline = EmbeddingPipeline::new(MockEmbedder::new(8));
//! let vector = pipeline.embed("Alice is a software engineer.");
//! assert_eq!(vector.len(), 8);
//! ```

#![warn(missing_docs)]

pub mod budget;
pub mod chunk;
mod http;
mod pipeline;
mod provider;

pub use http::HttpEmbedder;
pub use pipeline::EmbeddingPipeline;
pub use provider::{EmbeddingError, EmbeddingProvider, MockEmbedder};
