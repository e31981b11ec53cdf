//! Triplet module - the fundamental unit of the knowledge graph

/// A (subject, predicate, object) factual assertion extracted from a document
///
/// Triplets carry entity-type tags and free-text descriptions alongside the
/// core tuple. Embedding fields start out `None` and are filled in after the
/// review workflow approves the triplet; once a triplet has been written to
/// the graph store it is never mutated again.
#[derive(Debug, Clone, PartialEq)]
pub struct Triplet {
    /// Subject entity name
    pub subject: String,

    /// Relationship between subject and object
    pub predicate: String,

    /// Object entity name
    pub object: String,

    /// Type/category tag of the subject entity (e.g. "PERSON", "SKILL")
    pub subject_type: String,

    /// Type/category tag of the object entity
    pub object_type: String,

    /// Free-text description of the subject entity
    pub subject_description: String,

    /// Free-text description of the object entity
    pub object_description: String,

    /// Free-text description of the relationship
    pub relationship_description: String,

    /// Vector embedding of the subject entity, filled post-approval
    pub subject_embedding: Option<Vec<f32>>,

    /// Vector embedding of the object entity, filled post-approval
    pub object_embedding: Option<Vec<f32>>,

    /// Vector embedding of the relationship, filled post-approval
    pub relationship_embedding: Option<Vec<f32>>,
}

impl Triplet {
    /// Create a triplet from its core tuple, with empty metadata
    ///
    /// # Examples
    ///
    /// ```
    /// use resumegraph_domain::Triplet;
    ///
    /// let t = Triplet::new("Alice", "WORKED_AT", "Acme");
    /// assert_eq!(t.subject, "Alice");
    /// assert!(t.subject_embedding.is_none());
    /// ```
    pub fn new(
        subject: impl Into<String>,
        predicate: impl Into<String>,
        object: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
            subject_type: String::new(),
            object_type: String::new(),
            subject_description: String::new(),
            object_description: String::new(),
            relationship_description: String::new(),
            subject_embedding: None,
            object_embedding: None,
            relationship_embedding: None,
        }
    }

    /// Set the subject and object type tags
    pub fn with_types(
        mut self,
        subject_type: impl Into<String>,
        object_type: impl Into<String>,
    ) -> Self {
        self.subject_type = subject_type.into();
        self.object_type = object_type.into();
        self
    }

    /// Set the subject, object, and relationship descriptions
    pub fn with_descriptions(
        mut self,
        subject_description: impl Into<String>,
        object_description: impl Into<String>,
        relationship_description: impl Into<String>,
    ) -> Self {
        self.subject_description = subject_description.into();
        self.object_description = object_description.into();
        self.relationship_description = relationship_description.into();
        self
    }

    /// Whether all three embedding fields have been populated
    pub fn is_embedded(&self) -> bool {
        self.subject_embedding.is_some()
            && self.object_embedding.is_some()
            && self.relationship_embedding.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_has_empty_metadata() {
        let t = Triplet::new("Alice", "HAS_SKILL", "Rust");
        assert_eq!(t.subject, "Alice");
        assert_eq!(t.predicate, "HAS_SKILL");
        assert_eq!(t.object, "Rust");
        assert!(t.subject_type.is_empty());
        assert!(t.relationship_description.is_empty());
        assert!(!t.is_embedded());
    }

    #[test]
    fn test_builder_setters() {
        let t = Triplet::new("Alice", "WORKED_AT", "Acme")
            .with_types("PERSON", "COMPANY")
            .with_descriptions("Alice is an engineer", "Acme is a company", "2019 to 2024");

        assert_eq!(t.subject_type, "PERSON");
        assert_eq!(t.object_type, "COMPANY");
        assert_eq!(t.relationship_description, "2019 to 2024");
    }

    #[test]
    fn test_is_embedded_requires_all_three() {
        let mut t = Triplet::new("a", "b", "c");
        t.subject_embedding = Some(vec![1.0]);
        t.object_embedding = Some(vec![1.0]);
        assert!(!t.is_embedded());

        t.relationship_embedding = Some(vec![1.0]);
        assert!(t.is_embedded());
    }
}
