//! resumegraph Ingestion Layer
//!
//! Wires the pipeline end to end: read a document, prepare and extract it,
//! enrich the approved triplets with embeddings, and persist them as a
//! scope-isolated graph, with an SQLite record of every ingestion attempt.
//!
//! # Architecture
//!
//! ```text
//! DocumentReader → prepare → ExtractionOrchestrator → (review) →
//!     embedding enrichment → GraphStore + RecordStore
//! ```
//!
//! # Key Properties
//!
//! - **Idempotent re-ingestion**: documents are identified by a SHA-256
//!   content hash; ingesting identical content twice is detected and
//!   reported instead of re-extracted
//! - **Nothing silently discarded**: a graph write failure marks the record
//!   failed and is reported as a "not stored" outcome, never swallowed
//! - **Scoped deletion**: removing a resume removes exactly its graph scope
//!   and its record

#![warn(missing_docs)]

pub mod enrich;
mod error;
mod reader;
mod record;
mod service;
mod store;

pub use error::IngestError;
pub use reader::{ReadError, TextFileReader};
pub use record::{IngestionStatus, ResumeRecord};
pub use service::{CommitReport, ExtractionOutcome, IngestionService};
pub use store::{RecordStore, StoreError};
