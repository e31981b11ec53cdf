//! In-process graph store
//!
//! Keeps the same merge, endpoint-matching, and scope-isolation semantics as
//! the Cypher backend, without a running database. Used by tests and local
//! development runs.

use crate::error::GraphError;
use crate::records::{EntityRecord, EntityRow, RelationshipRecord, RelationshipRow, ScopeMetadata};
use crate::sanitize::{sanitize_label, sanitize_relationship};
use crate::store::GraphStore;
use resumegraph_domain::ScopeId;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::debug;

#[derive(Default)]
struct ScopeData {
    entities: Vec<EntityRow>,
    relationships: Vec<RelationshipRow>,
    metadata: Option<ScopeMetadata>,
}

/// In-memory implementation of [`GraphStore`]
#[derive(Default)]
pub struct MemoryStore {
    scopes: Mutex<HashMap<String, ScopeData>>,
    fail_writes: Mutex<bool>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate a backend outage: subsequent writes fail until reset
    pub fn set_fail_writes(&self, fail: bool) {
        *self.fail_writes.lock().unwrap() = fail;
    }

    fn check_writable(&self) -> Result<(), GraphError> {
        if *self.fail_writes.lock().unwrap() {
            return Err(GraphError::Connection(
                "simulated backend outage".to_string(),
            ));
        }
        Ok(())
    }

    /// Node identity within a scope: sanitized label plus name.
    fn node_key(entity_type: &str, name: &str) -> (String, String) {
        (sanitize_label(entity_type), name.to_string())
    }
}

impl GraphStore for MemoryStore {
    async fn upsert_entities(
        &self,
        scope: &ScopeId,
        entities: &[EntityRecord],
    ) -> Result<(), GraphError> {
        self.check_writable()?;
        let mut scopes = self.scopes.lock().unwrap();
        let data = scopes.entry(scope.as_str().to_string()).or_default();

        for entity in entities {
            let key = Self::node_key(&entity.entity_type, &entity.name);
            let existing = data
                .entities
                .iter_mut()
                .find(|row| Self::node_key(&row.entity_type, &row.name) == key);

            match existing {
                Some(row) => {
                    row.description = entity.description.clone();
                    row.embedding = entity.embedding.clone();
                }
                None => data.entities.push(EntityRow {
                    scope: scope.clone(),
                    name: entity.name.clone(),
                    entity_type: entity.entity_type.clone(),
                    description: entity.description.clone(),
                    embedding: entity.embedding.clone(),
                }),
            }
        }

        Ok(())
    }

    async fn upsert_relationships(
        &self,
        scope: &ScopeId,
        relationships: &[RelationshipRecord],
    ) -> Result<(), GraphError> {
        self.check_writable()?;
        let mut scopes = self.scopes.lock().unwrap();
        let data = scopes.entry(scope.as_str().to_string()).or_default();

        for relationship in relationships {
            let subject_key = Self::node_key(&relationship.subject_type, &relationship.subject);
            let object_key = Self::node_key(&relationship.object_type, &relationship.object);

            let endpoints_exist = data
                .entities
                .iter()
                .any(|row| Self::node_key(&row.entity_type, &row.name) == subject_key)
                && data
                    .entities
                    .iter()
                    .any(|row| Self::node_key(&row.entity_type, &row.name) == object_key);

            if !endpoints_exist {
                // Same behavior as the Cypher MATCH + MERGE: no rows, no edge.
                debug!(
                    "Skipping edge {} -[{}]-> {}: endpoint missing in scope",
                    relationship.subject, relationship.predicate, relationship.object
                );
                continue;
            }

            let predicate = sanitize_relationship(&relationship.predicate);
            let existing = data.relationships.iter_mut().find(|row| {
                row.subject == relationship.subject
                    && row.predicate == predicate
                    && row.object == relationship.object
            });

            match existing {
                Some(row) => {
                    row.description = relationship.description.clone();
                    row.embedding = relationship.embedding.clone();
                }
                None => data.relationships.push(RelationshipRow {
                    scope: scope.clone(),
                    subject: relationship.subject.clone(),
                    subject_type: relationship.subject_type.clone(),
                    predicate,
                    object: relationship.object.clone(),
                    object_type: relationship.object_type.clone(),
                    description: relationship.description.clone(),
                    embedding: relationship.embedding.clone(),
                }),
            }
        }

        Ok(())
    }

    async fn write_scope_metadata(
        &self,
        scope: &ScopeId,
        metadata: &ScopeMetadata,
    ) -> Result<(), GraphError> {
        self.check_writable()?;
        let mut scopes = self.scopes.lock().unwrap();
        let data = scopes.entry(scope.as_str().to_string()).or_default();
        data.metadata = Some(metadata.clone());
        Ok(())
    }

    async fn scope_metadata(&self, scope: &ScopeId) -> Result<Option<ScopeMetadata>, GraphError> {
        let scopes = self.scopes.lock().unwrap();
        Ok(scopes
            .get(scope.as_str())
            .and_then(|data| data.metadata.clone()))
    }

    async fn delete_scope(&self, scope: &ScopeId) -> Result<(), GraphError> {
        self.check_writable()?;
        self.scopes.lock().unwrap().remove(scope.as_str());
        Ok(())
    }

    async fn entities(
        &self,
        scope: Option<&ScopeId>,
        type_filter: Option<&str>,
    ) -> Result<Vec<EntityRow>, GraphError> {
        let scopes = self.scopes.lock().unwrap();
        let rows = scopes
            .iter()
            .filter(|(key, _)| scope.is_none_or(|s| s.as_str() == key.as_str()))
            .flat_map(|(_, data)| data.entities.iter())
            .filter(|row| type_filter.is_none_or(|t| row.entity_type == t))
            .cloned()
            .collect();
        Ok(rows)
    }

    async fn relationships(
        &self,
        scope: Option<&ScopeId>,
    ) -> Result<Vec<RelationshipRow>, GraphError> {
        let scopes = self.scopes.lock().unwrap();
        let rows = scopes
            .iter()
            .filter(|(key, _)| scope.is_none_or(|s| s.as_str() == key.as_str()))
            .flat_map(|(_, data)| data.relationships.iter())
            .cloned()
            .collect();
        Ok(rows)
    }
}
