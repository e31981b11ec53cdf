//! Resume ingestion records

use sha2::{Digest, Sha256};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Length of a derived resume identifier
const RESUME_ID_LEN: usize = 16;

/// Where a resume is in its ingestion lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestionStatus {
    /// Extracted but not yet committed to the graph
    Pending,
    /// Committed to the graph
    Completed,
    /// Preparation, extraction, or storage failed
    Failed,
}

impl IngestionStatus {
    /// Stable name used in the database and in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            IngestionStatus::Pending => "pending",
            IngestionStatus::Completed => "completed",
            IngestionStatus::Failed => "failed",
        }
    }

    /// Parse a stored status string
    pub fn parse(value: &str) -> Result<Self, String> {
        match value {
            "pending" => Ok(IngestionStatus::Pending),
            "completed" => Ok(IngestionStatus::Completed),
            "failed" => Ok(IngestionStatus::Failed),
            other => Err(format!("Unknown ingestion status: {}", other)),
        }
    }
}

/// One document's ingestion record
///
/// `content_hash` is the SHA-256 of the raw content; identical content always
/// hashes the same, which is how re-ingestion of an unchanged document is
/// detected. `resume_id` additionally mixes in the file path, so the same
/// document stored at two paths gets two records.
#[derive(Debug, Clone, PartialEq)]
pub struct ResumeRecord {
    /// Unique hash-derived identifier
    pub resume_id: String,
    /// File name component of the source path
    pub file_name: String,
    /// Full source path
    pub file_path: String,
    /// Original document text as read
    pub raw_content: String,
    /// Document text after the preparation pass
    pub cleaned_content: String,
    /// SHA-256 hex digest of `raw_content`
    pub content_hash: String,
    /// Lifecycle status
    pub status: IngestionStatus,
    /// Whether the graph commit succeeded
    pub graph_ingested: bool,
    /// Failure reason, if the ingestion failed
    pub error_message: Option<String>,
    /// Creation time (unix seconds)
    pub created_at: u64,
    /// Last update time (unix seconds)
    pub updated_at: u64,
    /// Graph commit time (unix seconds), once completed
    pub ingested_at: Option<u64>,
}

impl ResumeRecord {
    /// Build a pending record for a freshly read document
    pub fn from_file(path: &Path, raw_content: &str, cleaned_content: &str) -> Self {
        let content_hash = hash_content(raw_content);
        let resume_id = derive_resume_id(path, &content_hash);
        let now = unix_now();

        Self {
            resume_id,
            file_name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            file_path: path.display().to_string(),
            raw_content: raw_content.to_string(),
            cleaned_content: cleaned_content.to_string(),
            content_hash,
            status: IngestionStatus::Pending,
            graph_ingested: false,
            error_message: None,
            created_at: now,
            updated_at: now,
            ingested_at: None,
        }
    }
}

/// SHA-256 hex digest of the given content
pub fn hash_content(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Derive the record identifier from the source path and content hash
fn derive_resume_id(path: &Path, content_hash: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(path.display().to_string().as_bytes());
    hasher.update(content_hash.as_bytes());
    let digest = format!("{:x}", hasher.finalize());
    digest[..RESUME_ID_LEN].to_string()
}

/// Current time as unix seconds
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
