//! Error types for graph storage

use thiserror::Error;

/// Errors that can occur during graph store operations
#[derive(Error, Debug)]
pub enum GraphError {
    /// Failed to reach the graph backend
    #[error("Connection error: {0}")]
    Connection(String),

    /// A query failed to execute
    #[error("Query error: {0}")]
    Query(String),

    /// Stored data could not be decoded
    #[error("Invalid data: {0}")]
    InvalidData(String),
}
