//! resumegraph Graph Layer
//!
//! Scope-isolated property-graph persistence with idempotent merge writes
//! and embedding-based semantic search.
//!
//! # Architecture
//!
//! - **GraphStore**: async trait over graph backends
//! - **Neo4jStore**: Cypher over `neo4rs` with parameterized queries and
//!   sanitized schema identifiers
//! - **MemoryStore**: in-process reference implementation with the same
//!   merge/scoping semantics, used by tests and local runs
//! - **SemanticSearchEngine**: cosine-similarity ranking over stored
//!   entities, relationships, and whole triplets
//!
//! # Safety
//!
//! Entity types and predicates originate from free-text extraction. They are
//! never interpolated into query text: values travel as bound parameters,
//! and the only dynamic query fragments are labels and relationship types
//! that pass through a strict identifier sanitizer first.

#![warn(missing_docs)]

mod error;
mod memory;
mod neo4j;
mod records;
pub mod sanitize;
mod search;
pub mod similarity;
mod store;

pub use error::GraphError;
pub use memory::MemoryStore;
pub use neo4j::Neo4jStore;
pub use records::{
    entities_from_triplets, EntityRecord, EntityRow, RelationshipRecord, RelationshipRow,
    ScopeMetadata,
};
pub use search::{
    EntityMatch, RelationshipMatch, SearchKind, SearchResults, SemanticSearchEngine, TripletMatch,
};
pub use store::GraphStore;
