//! Error types for the ingestion layer

use crate::store::StoreError;
use resumegraph_extractor::ExtractError;
use resumegraph_graph::GraphError;
use thiserror::Error;

/// Errors that can occur during an ingestion operation
#[derive(Error, Debug)]
pub enum IngestError {
    /// The document could not be read
    #[error("Document read error: {0}")]
    Read(String),

    /// Document preparation rejected the whole document
    #[error("Document rejected: {0}")]
    DocumentRejected(String),

    /// The preparation call itself failed
    #[error("Preparation error: {0}")]
    Preparation(String),

    /// Extraction failed for the whole document
    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractError),

    /// The resume record store failed
    #[error("Record store error: {0}")]
    Records(#[from] StoreError),

    /// The graph backend failed
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    /// A background task died before returning
    #[error("Task error: {0}")]
    Task(String),

    /// Data failed an internal consistency check
    #[error("Invalid data: {0}")]
    InvalidData(String),
}
