//! Semantic search over stored graph data
//!
//! Candidates are fetched from the store and ranked in-process by cosine
//! similarity against the query vector. Records without a usable embedding
//! score `0.0` and fall out of the top-k naturally.

use crate::error::GraphError;
use crate::records::{EntityRow, RelationshipRow};
use crate::similarity::cosine_similarity;
use crate::store::GraphStore;
use resumegraph_domain::ScopeId;
use std::cmp::Ordering;
use std::collections::HashMap;

/// What to rank in a combined search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    /// Entity nodes only
    Entities,
    /// Relationship edges only
    Relationships,
    /// Both entities and relationships
    Both,
}

/// An entity ranked against the query vector
#[derive(Debug, Clone, PartialEq)]
pub struct EntityMatch {
    /// The matched entity
    pub entity: EntityRow,
    /// Cosine similarity against the query vector
    pub similarity: f32,
}

/// A relationship ranked against the query vector
#[derive(Debug, Clone, PartialEq)]
pub struct RelationshipMatch {
    /// The matched relationship
    pub relationship: RelationshipRow,
    /// Cosine similarity against the query vector
    pub similarity: f32,
}

/// A whole triplet ranked for question answering
///
/// Carries the endpoint descriptions so answer context can be assembled
/// without further queries.
#[derive(Debug, Clone, PartialEq)]
pub struct TripletMatch {
    /// The relationship at the triplet's core
    pub relationship: RelationshipRow,
    /// Description of the subject entity, if stored
    pub subject_description: String,
    /// Description of the object entity, if stored
    pub object_description: String,
    /// Maximum of the subject, object, and relationship similarities
    pub similarity: f32,
}

/// Combined result of a [`SearchKind::Both`] search
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResults {
    /// Ranked entity matches
    pub entities: Vec<EntityMatch>,
    /// Ranked relationship matches
    pub relationships: Vec<RelationshipMatch>,
}

/// Ranks stored entities and relationships against a query vector
pub struct SemanticSearchEngine<'a, G: GraphStore> {
    store: &'a G,
}

impl<'a, G: GraphStore> SemanticSearchEngine<'a, G> {
    /// Create a search engine over the given store
    pub fn new(store: &'a G) -> Self {
        Self { store }
    }

    /// Search entities and/or relationships
    ///
    /// `scope` of `None` aggregates across all scopes. Each requested kind
    /// is ranked descending by similarity and truncated to `top_k`.
    pub async fn search(
        &self,
        scope: Option<&ScopeId>,
        query_vector: &[f32],
        top_k: usize,
        kind: SearchKind,
        type_filter: Option<&str>,
    ) -> Result<SearchResults, GraphError> {
        let mut results = SearchResults::default();

        if matches!(kind, SearchKind::Entities | SearchKind::Both) {
            results.entities = self
                .search_entities(scope, query_vector, top_k, type_filter)
                .await?;
        }
        if matches!(kind, SearchKind::Relationships | SearchKind::Both) {
            results.relationships = self.search_relationships(scope, query_vector, top_k).await?;
        }

        Ok(results)
    }

    /// Rank entities against the query vector
    pub async fn search_entities(
        &self,
        scope: Option<&ScopeId>,
        query_vector: &[f32],
        top_k: usize,
        type_filter: Option<&str>,
    ) -> Result<Vec<EntityMatch>, GraphError> {
        let rows = self.store.entities(scope, type_filter).await?;

        let mut matches: Vec<EntityMatch> = rows
            .into_iter()
            .map(|entity| EntityMatch {
                similarity: similarity_to(query_vector, entity.embedding.as_deref()),
                entity,
            })
            .collect();

        rank(&mut matches, |m| m.similarity, top_k);
        Ok(matches)
    }

    /// Rank relationships against the query vector
    pub async fn search_relationships(
        &self,
        scope: Option<&ScopeId>,
        query_vector: &[f32],
        top_k: usize,
    ) -> Result<Vec<RelationshipMatch>, GraphError> {
        let rows = self.store.relationships(scope).await?;

        let mut matches: Vec<RelationshipMatch> = rows
            .into_iter()
            .map(|relationship| RelationshipMatch {
                similarity: similarity_to(query_vector, relationship.embedding.as_deref()),
                relationship,
            })
            .collect();

        rank(&mut matches, |m| m.similarity, top_k);
        Ok(matches)
    }

    /// Rank whole triplets for question answering
    ///
    /// A triplet's relevance is the maximum of its subject-embedding,
    /// object-embedding, and relationship-embedding similarities against
    /// the query vector.
    pub async fn search_triplets(
        &self,
        scope: Option<&ScopeId>,
        query_vector: &[f32],
        top_k: usize,
    ) -> Result<Vec<TripletMatch>, GraphError> {
        let relationships = self.store.relationships(scope).await?;
        let entities = self.store.entities(scope, None).await?;

        // Entity lookup by (scope, name); first occurrence wins.
        let mut by_name: HashMap<(&str, &str), &EntityRow> = HashMap::new();
        for entity in &entities {
            by_name
                .entry((entity.scope.as_str(), entity.name.as_str()))
                .or_insert(entity);
        }

        let mut matches: Vec<TripletMatch> = relationships
            .into_iter()
            .map(|relationship| {
                let subject =
                    by_name.get(&(relationship.scope.as_str(), relationship.subject.as_str()));
                let object =
                    by_name.get(&(relationship.scope.as_str(), relationship.object.as_str()));

                let subject_similarity =
                    similarity_to(query_vector, subject.and_then(|e| e.embedding.as_deref()));
                let object_similarity =
                    similarity_to(query_vector, object.and_then(|e| e.embedding.as_deref()));
                let relationship_similarity =
                    similarity_to(query_vector, relationship.embedding.as_deref());

                TripletMatch {
                    similarity: subject_similarity
                        .max(object_similarity)
                        .max(relationship_similarity),
                    subject_description: subject
                        .map(|e| e.description.clone())
                        .unwrap_or_default(),
                    object_description: object.map(|e| e.description.clone()).unwrap_or_default(),
                    relationship,
                }
            })
            .collect();

        rank(&mut matches, |m| m.similarity, top_k);
        Ok(matches)
    }
}

fn similarity_to(query_vector: &[f32], embedding: Option<&[f32]>) -> f32 {
    embedding
        .map(|e| cosine_similarity(query_vector, e))
        .unwrap_or(0.0)
}

/// Sort descending by score and truncate to `top_k`
fn rank<T>(matches: &mut Vec<T>, score: impl Fn(&T) -> f32, top_k: usize) {
    matches.sort_by(|a, b| {
        score(b)
            .partial_cmp(&score(a))
            .unwrap_or(Ordering::Equal)
    });
    matches.truncate(top_k);
}
