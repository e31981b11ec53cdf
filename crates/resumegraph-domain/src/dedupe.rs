//! Triplet deduplication by exact signature

use crate::Triplet;
use std::collections::HashSet;

/// Delimiter joining signature fields; not expected in natural text
pub const SIGNATURE_DELIMITER: &str = "|";

/// The deduplication key of a triplet: subject, predicate, and object joined
/// with [`SIGNATURE_DELIMITER`]
///
/// Comparison is exact string equality, case-sensitive, with no
/// normalization beyond what extraction already performed.
///
/// # Examples
///
/// ```
/// use resumegraph_domain::{dedupe::signature, Triplet};
///
/// let t = Triplet::new("Alice", "WORKED_AT", "Acme");
/// assert_eq!(signature(&t), "Alice|WORKED_AT|Acme");
/// ```
pub fn signature(triplet: &Triplet) -> String {
    format!(
        "{}{delim}{}{delim}{}",
        triplet.subject,
        triplet.predicate,
        triplet.object,
        delim = SIGNATURE_DELIMITER
    )
}

/// Filter `candidates` down to those whose signature appears neither in
/// `existing` nor earlier in `candidates`, preserving candidate order
///
/// Idempotent: running the result through `dedupe` again (with the same
/// `existing`) returns it unchanged.
pub fn dedupe(existing: &[Triplet], candidates: Vec<Triplet>) -> Vec<Triplet> {
    let mut seen: HashSet<String> = existing.iter().map(signature).collect();

    candidates
        .into_iter()
        .filter(|candidate| seen.insert(signature(candidate)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_uses_delimiter() {
        let t = Triplet::new("A", "WORKED_AT", "B");
        assert_eq!(signature(&t), "A|WORKED_AT|B");
    }

    #[test]
    fn test_signature_is_case_sensitive() {
        let a = Triplet::new("Alice", "HAS_SKILL", "Rust");
        let b = Triplet::new("alice", "HAS_SKILL", "Rust");
        assert_ne!(signature(&a), signature(&b));
    }

    #[test]
    fn test_exact_duplicate_removed() {
        let candidates = vec![
            Triplet::new("A", "WORKED_AT", "B"),
            Triplet::new("A", "WORKED_AT", "B"),
        ];
        let unique = dedupe(&[], candidates);
        assert_eq!(unique.len(), 1);
    }

    #[test]
    fn test_existing_signatures_excluded() {
        let existing = vec![Triplet::new("A", "WORKED_AT", "B")];
        let candidates = vec![
            Triplet::new("A", "WORKED_AT", "B"),
            Triplet::new("A", "HAS_SKILL", "C"),
        ];
        let unique = dedupe(&existing, candidates);
        assert_eq!(unique.len(), 1);
        assert_eq!(unique[0].predicate, "HAS_SKILL");
    }

    #[test]
    fn test_candidate_order_preserved() {
        let candidates = vec![
            Triplet::new("A", "p1", "B"),
            Triplet::new("C", "p2", "D"),
            Triplet::new("A", "p1", "B"),
            Triplet::new("E", "p3", "F"),
        ];
        let unique = dedupe(&[], candidates);
        let subjects: Vec<&str> = unique.iter().map(|t| t.subject.as_str()).collect();
        assert_eq!(subjects, vec!["A", "C", "E"]);
    }

    #[test]
    fn test_metadata_does_not_affect_signature() {
        // Two triplets with the same tuple but different descriptions are
        // duplicates; the first one wins.
        let candidates = vec![
            Triplet::new("A", "p", "B").with_descriptions("first", "", ""),
            Triplet::new("A", "p", "B").with_descriptions("second", "", ""),
        ];
        let unique = dedupe(&[], candidates);
        assert_eq!(unique.len(), 1);
        assert_eq!(unique[0].subject_description, "first");
    }

    #[test]
    fn test_empty_inputs() {
        assert!(dedupe(&[], vec![]).is_empty());
        let existing = vec![Triplet::new("A", "p", "B")];
        assert!(dedupe(&existing, vec![]).is_empty());
    }
}
