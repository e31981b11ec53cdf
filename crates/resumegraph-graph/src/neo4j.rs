//! Neo4j-compatible graph store
//!
//! Cypher over `neo4rs` (async, pooled Bolt connections). Every
//! user-influenced value is a bound parameter; the only dynamic query
//! fragments are labels and relationship types that pass through
//! [`crate::sanitize`] first. Embeddings persist as JSON strings on node and
//! edge properties.

use crate::error::GraphError;
use crate::records::{EntityRecord, EntityRow, RelationshipRecord, RelationshipRow, ScopeMetadata};
use crate::sanitize::{sanitize_label, sanitize_relationship};
use crate::store::GraphStore;
use neo4rs::{query, Graph};
use resumegraph_domain::ScopeId;
use tracing::{debug, info};

/// Graph store backed by a Neo4j-compatible Bolt endpoint
pub struct Neo4jStore {
    graph: Graph,
}

/// Serialize an optional embedding for property storage
fn embedding_to_json(embedding: &Option<Vec<f32>>) -> String {
    match embedding {
        Some(vector) => serde_json::to_string(vector).unwrap_or_else(|_| "null".to_string()),
        None => "null".to_string(),
    }
}

/// Decode an embedding property written by [`embedding_to_json`]
fn embedding_from_json(raw: &str) -> Option<Vec<f32>> {
    serde_json::from_str::<Option<Vec<f32>>>(raw).ok().flatten()
}

impl Neo4jStore {
    /// Connect to the graph backend
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use resumegraph_graph::Neo4jStore;
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let store = Neo4jStore::connect("127.0.0.1:7687", "neo4j", "password").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn connect(uri: &str, user: &str, password: &str) -> Result<Self, GraphError> {
        let graph = Graph::new(uri, user, password)
            .await
            .map_err(|e| GraphError::Connection(e.to_string()))?;
        info!("Connected to graph backend at {}", uri);
        Ok(Self { graph })
    }

    /// Verify connectivity to the backend
    pub async fn ping(&self) -> Result<(), GraphError> {
        self.graph
            .run(query("RETURN 1"))
            .await
            .map_err(|e| GraphError::Connection(e.to_string()))
    }

    /// Create indexes on commonly queried properties
    ///
    /// Index creation failures are ignored (the index may already exist).
    pub async fn create_indexes(&self) -> Result<(), GraphError> {
        for label in ["Person", "Company", "Skill", "Technology", "Position", "Project"] {
            let cypher = format!(
                "CREATE INDEX IF NOT EXISTS FOR (n:{}) ON (n.name)",
                label
            );
            if let Err(e) = self.graph.run(query(&cypher)).await {
                debug!("Index creation for {} skipped: {}", label, e);
            }
        }
        Ok(())
    }
}

impl GraphStore for Neo4jStore {
    async fn upsert_entities(
        &self,
        scope: &ScopeId,
        entities: &[EntityRecord],
    ) -> Result<(), GraphError> {
        for entity in entities {
            let label = sanitize_label(&entity.entity_type);
            let cypher = format!(
                "MERGE (e:{} {{name: $name, resume_id: $scope}}) \
                 SET e.entity_type = $entity_type, e.description = $description, \
                     e.embedding = $embedding",
                label
            );

            self.graph
                .run(
                    query(&cypher)
                        .param("name", entity.name.as_str())
                        .param("scope", scope.as_str())
                        .param("entity_type", entity.entity_type.as_str())
                        .param("description", entity.description.as_str())
                        .param("embedding", embedding_to_json(&entity.embedding)),
                )
                .await
                .map_err(|e| GraphError::Query(e.to_string()))?;
        }

        debug!("Upserted {} entities into scope {}", entities.len(), scope);
        Ok(())
    }

    async fn upsert_relationships(
        &self,
        scope: &ScopeId,
        relationships: &[RelationshipRecord],
    ) -> Result<(), GraphError> {
        for relationship in relationships {
            let subject_label = sanitize_label(&relationship.subject_type);
            let object_label = sanitize_label(&relationship.object_type);
            let relationship_type = sanitize_relationship(&relationship.predicate);

            // If either MATCH finds no node, the MERGE never runs and the
            // edge is simply not created.
            let cypher = format!(
                "MATCH (s:{} {{name: $subject, resume_id: $scope}}) \
                 MATCH (o:{} {{name: $object, resume_id: $scope}}) \
                 MERGE (s)-[r:{} {{resume_id: $scope}}]->(o) \
                 SET r.description = $description, r.embedding = $embedding",
                subject_label, object_label, relationship_type
            );

            self.graph
                .run(
                    query(&cypher)
                        .param("subject", relationship.subject.as_str())
                        .param("object", relationship.object.as_str())
                        .param("scope", scope.as_str())
                        .param("description", relationship.description.as_str())
                        .param("embedding", embedding_to_json(&relationship.embedding)),
                )
                .await
                .map_err(|e| GraphError::Query(e.to_string()))?;
        }

        debug!(
            "Upserted {} relationships into scope {}",
            relationships.len(),
            scope
        );
        Ok(())
    }

    async fn write_scope_metadata(
        &self,
        scope: &ScopeId,
        metadata: &ScopeMetadata,
    ) -> Result<(), GraphError> {
        self.graph
            .run(
                query(
                    "MERGE (m:ResumeScope {id: $scope}) \
                     SET m.entity_count = $entity_count, m.triplet_count = $triplet_count, \
                         m.validation_message = $validation_message",
                )
                .param("scope", scope.as_str())
                .param("entity_count", metadata.entity_count as i64)
                .param("triplet_count", metadata.triplet_count as i64)
                .param("validation_message", metadata.validation_message.as_str()),
            )
            .await
            .map_err(|e| GraphError::Query(e.to_string()))
    }

    async fn scope_metadata(&self, scope: &ScopeId) -> Result<Option<ScopeMetadata>, GraphError> {
        let mut stream = self
            .graph
            .execute(
                query(
                    "MATCH (m:ResumeScope {id: $scope}) \
                     RETURN m.entity_count AS entity_count, m.triplet_count AS triplet_count, \
                            m.validation_message AS validation_message",
                )
                .param("scope", scope.as_str()),
            )
            .await
            .map_err(|e| GraphError::Query(e.to_string()))?;

        let row = stream
            .next()
            .await
            .map_err(|e| GraphError::Query(e.to_string()))?;

        Ok(row.map(|row| ScopeMetadata {
            entity_count: row.get::<i64>("entity_count").unwrap_or_default() as usize,
            triplet_count: row.get::<i64>("triplet_count").unwrap_or_default() as usize,
            validation_message: row.get::<String>("validation_message").unwrap_or_default(),
        }))
    }

    async fn delete_scope(&self, scope: &ScopeId) -> Result<(), GraphError> {
        // Scoped cascade: every node carrying the scope tag plus the
        // metadata record, nothing else.
        self.graph
            .run(
                query("MATCH (n {resume_id: $scope}) DETACH DELETE n")
                    .param("scope", scope.as_str()),
            )
            .await
            .map_err(|e| GraphError::Query(e.to_string()))?;

        self.graph
            .run(query("MATCH (m:ResumeScope {id: $scope}) DELETE m").param("scope", scope.as_str()))
            .await
            .map_err(|e| GraphError::Query(e.to_string()))?;

        info!("Deleted scope {}", scope);
        Ok(())
    }

    async fn entities(
        &self,
        scope: Option<&ScopeId>,
        type_filter: Option<&str>,
    ) -> Result<Vec<EntityRow>, GraphError> {
        let mut cypher =
            String::from("MATCH (e) WHERE e.name IS NOT NULL AND e.resume_id ");
        cypher.push_str(if scope.is_some() { "= $scope" } else { "IS NOT NULL" });
        if type_filter.is_some() {
            cypher.push_str(" AND e.entity_type = $entity_type");
        }
        cypher.push_str(
            " RETURN e.name AS name, e.entity_type AS entity_type, \
             e.description AS description, e.embedding AS embedding, \
             e.resume_id AS resume_id",
        );

        let mut q = query(&cypher);
        if let Some(scope) = scope {
            q = q.param("scope", scope.as_str());
        }
        if let Some(entity_type) = type_filter {
            q = q.param("entity_type", entity_type);
        }

        let mut stream = self
            .graph
            .execute(q)
            .await
            .map_err(|e| GraphError::Query(e.to_string()))?;

        let mut rows = Vec::new();
        while let Some(row) = stream
            .next()
            .await
            .map_err(|e| GraphError::Query(e.to_string()))?
        {
            rows.push(EntityRow {
                scope: ScopeId::from_string(row.get::<String>("resume_id").unwrap_or_default()),
                name: row.get::<String>("name").unwrap_or_default(),
                entity_type: row.get::<String>("entity_type").unwrap_or_default(),
                description: row.get::<String>("description").unwrap_or_default(),
                embedding: embedding_from_json(
                    &row.get::<String>("embedding").unwrap_or_default(),
                ),
            });
        }

        Ok(rows)
    }

    async fn relationships(
        &self,
        scope: Option<&ScopeId>,
    ) -> Result<Vec<RelationshipRow>, GraphError> {
        let mut cypher = String::from("MATCH (s)-[r]->(o) WHERE r.resume_id ");
        cypher.push_str(if scope.is_some() { "= $scope" } else { "IS NOT NULL" });
        cypher.push_str(
            " RETURN s.name AS subject, s.entity_type AS subject_type, \
             type(r) AS predicate, o.name AS object, o.entity_type AS object_type, \
             r.description AS description, r.embedding AS embedding, \
             r.resume_id AS resume_id",
        );

        let mut q = query(&cypher);
        if let Some(scope) = scope {
            q = q.param("scope", scope.as_str());
        }

        let mut stream = self
            .graph
            .execute(q)
            .await
            .map_err(|e| GraphError::Query(e.to_string()))?;

        let mut rows = Vec::new();
        while let Some(row) = stream
            .next()
            .await
            .map_err(|e| GraphError::Query(e.to_string()))?
        {
            rows.push(RelationshipRow {
                scope: ScopeId::from_string(row.get::<String>("resume_id").unwrap_or_default()),
                subject: row.get::<String>("subject").unwrap_or_default(),
                subject_type: row.get::<String>("subject_type").unwrap_or_default(),
                predicate: row.get::<String>("predicate").unwrap_or_default(),
                object: row.get::<String>("object").unwrap_or_default(),
                object_type: row.get::<String>("object_type").unwrap_or_default(),
                description: row.get::<String>("description").unwrap_or_default(),
                embedding: embedding_from_json(
                    &row.get::<String>("embedding").unwrap_or_default(),
                ),
            });
        }

        Ok(rows)
    }
}
