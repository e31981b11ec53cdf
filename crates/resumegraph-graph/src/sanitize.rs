//! Schema identifier sanitization
//!
//! Entity types and predicates come from upstream free-text extraction and
//! end up as graph labels and relationship types, which Cypher cannot bind
//! as parameters. Before any such string reaches query text it is reduced to
//! a strict identifier charset here; everything else travels as a bound
//! parameter.

/// Fallback node label for unusable entity types
pub const FALLBACK_LABEL: &str = "Entity";

/// Fallback relationship type for unusable predicates
pub const FALLBACK_RELATIONSHIP: &str = "RELATED_TO";

/// Sanitize an entity type into a graph label
///
/// The result matches `[A-Za-z][A-Za-z0-9_]*`; separators collapse to
/// single underscores and every other character is dropped. Unusable input
/// yields [`FALLBACK_LABEL`].
///
/// # Examples
///
/// ```
/// use resumegraph_graph::sanitize::sanitize_label;
///
/// assert_eq!(sanitize_label("PERSON"), "PERSON");
/// assert_eq!(sanitize_label("job title"), "job_title");
/// assert_eq!(sanitize_label("`) DETACH DELETE (n"), "DETACH_DELETE_n");
/// assert_eq!(sanitize_label("!!!"), "Entity");
/// ```
pub fn sanitize_label(raw: &str) -> String {
    sanitize_identifier(raw).unwrap_or_else(|| FALLBACK_LABEL.to_string())
}

/// Sanitize a predicate into a relationship type
///
/// Same charset rules as [`sanitize_label`], uppercased by convention.
/// Unusable input yields [`FALLBACK_RELATIONSHIP`].
pub fn sanitize_relationship(raw: &str) -> String {
    sanitize_identifier(raw)
        .map(|s| s.to_uppercase())
        .unwrap_or_else(|| FALLBACK_RELATIONSHIP.to_string())
}

/// Reduce a string to `[A-Za-z][A-Za-z0-9_]*`, or `None` if nothing usable
/// remains
fn sanitize_identifier(raw: &str) -> Option<String> {
    let mut out = String::with_capacity(raw.len());
    let mut pending_separator = false;

    for c in raw.trim().chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !out.is_empty() {
                out.push('_');
            }
            out.push(c);
            pending_separator = false;
        } else if c.is_whitespace() || c == '-' || c == '_' {
            pending_separator = true;
        }
        // anything else is dropped entirely
    }

    // Must start with a letter.
    let start = out.find(|c: char| c.is_ascii_alphabetic())?;
    Some(out[start..].to_string())
}
