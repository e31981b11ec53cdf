//! Resume scope identifiers

use std::fmt;

/// Opaque identifier binding all graph data produced from one document
///
/// Every node and edge written for a document carries its scope, and scoped
/// deletion removes exactly that data and nothing else. Scopes derived from a
/// content hash make re-ingestion of an identical document land on the same
/// identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScopeId(String);

impl ScopeId {
    /// Length of a content-hash-derived scope id
    const HASH_ID_LEN: usize = 16;

    /// Generate a fresh, random scope id (UUIDv7)
    pub fn generate() -> Self {
        Self(uuid::Uuid::now_v7().to_string())
    }

    /// Derive a scope id from a hex-encoded content hash
    ///
    /// Takes the first 16 characters, so identical content always maps to
    /// the same scope.
    ///
    /// # Errors
    /// Returns an error if the hash is shorter than 16 characters.
    pub fn from_content_hash(hash: &str) -> Result<Self, String> {
        if hash.len() < Self::HASH_ID_LEN {
            return Err(format!(
                "content hash too short: {} chars (need {})",
                hash.len(),
                Self::HASH_ID_LEN
            ));
        }
        Ok(Self(hash[..Self::HASH_ID_LEN].to_string()))
    }

    /// Wrap an existing identifier (e.g. read back from the record store)
    pub fn from_string(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Get the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_unique() {
        let a = ScopeId::generate();
        let b = ScopeId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_from_content_hash_truncates() {
        let hash = "0123456789abcdef0123456789abcdef";
        let scope = ScopeId::from_content_hash(hash).unwrap();
        assert_eq!(scope.as_str(), "0123456789abcdef");
    }

    #[test]
    fn test_from_content_hash_deterministic() {
        let hash = "deadbeefdeadbeefdeadbeef";
        let a = ScopeId::from_content_hash(hash).unwrap();
        let b = ScopeId::from_content_hash(hash).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_from_content_hash_too_short() {
        assert!(ScopeId::from_content_hash("abc").is_err());
    }

    #[test]
    fn test_display_round_trip() {
        let scope = ScopeId::from_string("scope-1");
        assert_eq!(scope.to_string(), "scope-1");
        assert_eq!(ScopeId::from_string(scope.to_string()), scope);
    }
}
