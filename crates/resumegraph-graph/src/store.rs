//! Graph store trait

use crate::error::GraphError;
use crate::records::{EntityRecord, EntityRow, RelationshipRecord, RelationshipRow, ScopeMetadata};
use resumegraph_domain::ScopeId;

/// Trait representing a scope-isolated property-graph backend
///
/// All writes are merges: re-running an operation with identical input must
/// not create duplicate nodes or edges. Relationship writes whose endpoint
/// nodes are absent in the scope are silently skipped, not errors; callers
/// are responsible for upserting entities first.
#[allow(async_fn_in_trait)]
pub trait GraphStore {
    /// Merge-create entity nodes keyed by `(name, type, scope)`
    async fn upsert_entities(
        &self,
        scope: &ScopeId,
        entities: &[EntityRecord],
    ) -> Result<(), GraphError>;

    /// Merge-create one edge per relationship between existing nodes of the
    /// same scope
    async fn upsert_relationships(
        &self,
        scope: &ScopeId,
        relationships: &[RelationshipRecord],
    ) -> Result<(), GraphError>;

    /// Merge-create the scope-level metadata record
    async fn write_scope_metadata(
        &self,
        scope: &ScopeId,
        metadata: &ScopeMetadata,
    ) -> Result<(), GraphError>;

    /// Read back the scope-level metadata record, if present
    async fn scope_metadata(&self, scope: &ScopeId) -> Result<Option<ScopeMetadata>, GraphError>;

    /// Remove every node, edge, and metadata record tagged with `scope`,
    /// touching nothing else
    async fn delete_scope(&self, scope: &ScopeId) -> Result<(), GraphError>;

    /// Entities of one scope, or of all scopes when `scope` is `None`,
    /// optionally filtered by entity type
    async fn entities(
        &self,
        scope: Option<&ScopeId>,
        type_filter: Option<&str>,
    ) -> Result<Vec<EntityRow>, GraphError>;

    /// Relationships of one scope, or of all scopes when `scope` is `None`
    async fn relationships(
        &self,
        scope: Option<&ScopeId>,
    ) -> Result<Vec<RelationshipRow>, GraphError>;
}
