//! Write payloads and query rows for the graph store

use resumegraph_domain::{ScopeId, Triplet};
use std::collections::HashSet;

/// An entity to merge into the graph, keyed by `(name, type, scope)`
#[derive(Debug, Clone, PartialEq)]
pub struct EntityRecord {
    /// Entity name
    pub name: String,
    /// Entity type tag as extracted (sanitized into a label at write time)
    pub entity_type: String,
    /// Free-text description
    pub description: String,
    /// Vector embedding, if one was produced
    pub embedding: Option<Vec<f32>>,
}

/// A relationship to merge into the graph, one per approved triplet
///
/// The edge is only created when both endpoint nodes already exist in the
/// same scope; otherwise the write is silently skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationshipRecord {
    /// Subject entity name
    pub subject: String,
    /// Subject entity type tag
    pub subject_type: String,
    /// Predicate as extracted (sanitized into a relationship type at write
    /// time)
    pub predicate: String,
    /// Object entity name
    pub object: String,
    /// Object entity type tag
    pub object_type: String,
    /// Free-text description of the relationship
    pub description: String,
    /// Vector embedding of the relationship, if one was produced
    pub embedding: Option<Vec<f32>>,
}

impl RelationshipRecord {
    /// Build the relationship write payload for one triplet
    pub fn from_triplet(triplet: &Triplet) -> Self {
        Self {
            subject: triplet.subject.clone(),
            subject_type: triplet.subject_type.clone(),
            predicate: triplet.predicate.clone(),
            object: triplet.object.clone(),
            object_type: triplet.object_type.clone(),
            description: triplet.relationship_description.clone(),
            embedding: triplet.relationship_embedding.clone(),
        }
    }
}

/// Scope-level bookkeeping stored alongside the graph data
#[derive(Debug, Clone, PartialEq)]
pub struct ScopeMetadata {
    /// Number of distinct entities written for the scope
    pub entity_count: usize,
    /// Number of triplets written for the scope
    pub triplet_count: usize,
    /// The extraction's validation message
    pub validation_message: String,
}

/// An entity row returned by graph queries
#[derive(Debug, Clone, PartialEq)]
pub struct EntityRow {
    /// Scope the entity belongs to
    pub scope: ScopeId,
    /// Entity name
    pub name: String,
    /// Entity type tag as written
    pub entity_type: String,
    /// Free-text description
    pub description: String,
    /// Vector embedding, if stored
    pub embedding: Option<Vec<f32>>,
}

/// A relationship row returned by graph queries
#[derive(Debug, Clone, PartialEq)]
pub struct RelationshipRow {
    /// Scope the relationship belongs to
    pub scope: ScopeId,
    /// Subject entity name
    pub subject: String,
    /// Subject entity type tag
    pub subject_type: String,
    /// Relationship type as stored (sanitized form of the predicate)
    pub predicate: String,
    /// Object entity name
    pub object: String,
    /// Object entity type tag
    pub object_type: String,
    /// Free-text description
    pub description: String,
    /// Vector embedding, if stored
    pub embedding: Option<Vec<f32>>,
}

/// Derive the unique entity set from the endpoints of a triplet list
///
/// Entities are keyed by `(name, type)`; the first occurrence wins, so a
/// subject's description is never overwritten by a later, sparser mention of
/// the same entity as an object.
pub fn entities_from_triplets(triplets: &[Triplet]) -> Vec<EntityRecord> {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut entities = Vec::new();

    for triplet in triplets {
        let subject_key = (triplet.subject.clone(), triplet.subject_type.clone());
        if seen.insert(subject_key) {
            entities.push(EntityRecord {
                name: triplet.subject.clone(),
                entity_type: triplet.subject_type.clone(),
                description: triplet.subject_description.clone(),
                embedding: triplet.subject_embedding.clone(),
            });
        }

        let object_key = (triplet.object.clone(), triplet.object_type.clone());
        if seen.insert(object_key) {
            entities.push(EntityRecord {
                name: triplet.object.clone(),
                entity_type: triplet.object_type.clone(),
                description: triplet.object_description.clone(),
                embedding: triplet.object_embedding.clone(),
            });
        }
    }

    entities
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triplet(subject: &str, predicate: &str, object: &str) -> Triplet {
        Triplet::new(subject, predicate, object).with_types("PERSON", "COMPANY")
    }

    #[test]
    fn test_relationship_record_from_triplet() {
        let mut t = triplet("Alice", "WORKED_AT", "Acme");
        t.relationship_description = "From 2019 to 2024".to_string();
        t.relationship_embedding = Some(vec![0.1, 0.2]);

        let record = RelationshipRecord::from_triplet(&t);
        assert_eq!(record.subject, "Alice");
        assert_eq!(record.predicate, "WORKED_AT");
        assert_eq!(record.object, "Acme");
        assert_eq!(record.description, "From 2019 to 2024");
        assert_eq!(record.embedding, Some(vec![0.1, 0.2]));
    }

    #[test]
    fn test_entities_from_triplets_unique_by_name_and_type() {
        let triplets = vec![
            triplet("Alice", "WORKED_AT", "Acme"),
            triplet("Alice", "WORKED_AT", "Globex"),
            triplet("Alice", "MANAGED", "Acme"),
        ];

        let entities = entities_from_triplets(&triplets);
        let names: Vec<&str> = entities.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Acme", "Globex"]);
    }

    #[test]
    fn test_entities_first_occurrence_wins() {
        let mut first = triplet("Alice", "WORKED_AT", "Acme");
        first.subject_description = "rich description".to_string();
        let mut second = triplet("Bob", "COLLABORATED_WITH", "Alice");
        second.object_type = "PERSON".to_string();
        second.object_description = "sparse".to_string();

        let entities = entities_from_triplets(&[first, second]);
        let alice = entities.iter().find(|e| e.name == "Alice").unwrap();
        assert_eq!(alice.description, "rich description");
    }

    #[test]
    fn test_same_name_different_type_is_two_entities() {
        let mut t = triplet("Phoenix", "LOCATED_IN", "Phoenix");
        t.subject_type = "PROJECT".to_string();
        t.object_type = "LOCATION".to_string();

        let entities = entities_from_triplets(&[t]);
        assert_eq!(entities.len(), 2);
    }
}
