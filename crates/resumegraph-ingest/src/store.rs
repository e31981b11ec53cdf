//! SQLite-backed resume record store

use crate::record::{unix_now, IngestionStatus, ResumeRecord};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during record store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Record not found
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

const SELECT_COLUMNS: &str = "resume_id, file_name, file_path, raw_content, cleaned_content, \
     content_hash, ingestion_status, graph_ingested, error_message, \
     created_at, updated_at, ingested_at";

/// SQLite-based store for [`ResumeRecord`]s
///
/// An explicitly constructed handle with scoped lifetime; callers that need
/// the store receive it as a parameter rather than reaching for ambient
/// state.
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Each thread should have its own
/// `RecordStore` instance.
///
/// # Examples
///
/// ```
/// use resumegraph_ingest::RecordStore;
///
/// let store = RecordStore::open(":memory:").unwrap();
/// assert_eq!(store.count(None).unwrap(), 0);
/// ```
pub struct RecordStore {
    conn: Connection,
}

impl RecordStore {
    /// Open (and initialize) the record database at the given path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        self.conn.execute_batch(schema)?;
        Ok(())
    }

    /// Insert the record, or update it if its `resume_id` already exists
    pub fn upsert(&mut self, record: &ResumeRecord) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO resumes (
                resume_id, file_name, file_path, raw_content, cleaned_content,
                content_hash, ingestion_status, graph_ingested, error_message,
                created_at, updated_at, ingested_at
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
             ON CONFLICT(resume_id) DO UPDATE SET
                file_name = excluded.file_name,
                file_path = excluded.file_path,
                raw_content = excluded.raw_content,
                cleaned_content = excluded.cleaned_content,
                content_hash = excluded.content_hash,
                ingestion_status = excluded.ingestion_status,
                graph_ingested = excluded.graph_ingested,
                error_message = excluded.error_message,
                updated_at = excluded.updated_at,
                ingested_at = excluded.ingested_at",
            params![
                &record.resume_id,
                &record.file_name,
                &record.file_path,
                &record.raw_content,
                &record.cleaned_content,
                &record.content_hash,
                record.status.as_str(),
                record.graph_ingested,
                &record.error_message,
                record.created_at as i64,
                record.updated_at as i64,
                record.ingested_at.map(|t| t as i64),
            ],
        )?;

        Ok(())
    }

    /// Look up a record by its unique identifier
    pub fn find_by_id(&self, resume_id: &str) -> Result<Option<ResumeRecord>, StoreError> {
        let record = self
            .conn
            .query_row(
                &format!("SELECT {} FROM resumes WHERE resume_id = ?1", SELECT_COLUMNS),
                params![resume_id],
                Self::map_row,
            )
            .optional()?;
        Ok(record)
    }

    /// Look up the most recent record with the given content hash
    ///
    /// This is the idempotent re-ingestion check: a byte-identical document
    /// always lands on the same hash.
    pub fn find_by_content_hash(&self, hash: &str) -> Result<Option<ResumeRecord>, StoreError> {
        let record = self
            .conn
            .query_row(
                &format!(
                    "SELECT {} FROM resumes WHERE content_hash = ?1 \
                     ORDER BY created_at DESC LIMIT 1",
                    SELECT_COLUMNS
                ),
                params![hash],
                Self::map_row,
            )
            .optional()?;
        Ok(record)
    }

    /// Mark a record as successfully committed to the graph
    pub fn mark_completed(&mut self, resume_id: &str) -> Result<(), StoreError> {
        let now = unix_now() as i64;
        let updated = self.conn.execute(
            "UPDATE resumes SET ingestion_status = 'completed', graph_ingested = 1,
                error_message = NULL, ingested_at = ?2, updated_at = ?2
             WHERE resume_id = ?1",
            params![resume_id, now],
        )?;

        if updated == 0 {
            return Err(StoreError::NotFound(resume_id.to_string()));
        }
        Ok(())
    }

    /// Mark a record as failed with a reason
    pub fn mark_failed(&mut self, resume_id: &str, message: &str) -> Result<(), StoreError> {
        let now = unix_now() as i64;
        let updated = self.conn.execute(
            "UPDATE resumes SET ingestion_status = 'failed', graph_ingested = 0,
                error_message = ?2, updated_at = ?3
             WHERE resume_id = ?1",
            params![resume_id, message, now],
        )?;

        if updated == 0 {
            return Err(StoreError::NotFound(resume_id.to_string()));
        }
        Ok(())
    }

    /// Delete a record; returns whether one existed
    pub fn delete(&mut self, resume_id: &str) -> Result<bool, StoreError> {
        let deleted = self
            .conn
            .execute("DELETE FROM resumes WHERE resume_id = ?1", params![resume_id])?;
        Ok(deleted > 0)
    }

    /// List records, newest first, optionally filtered by status
    pub fn list(&self, status: Option<IngestionStatus>) -> Result<Vec<ResumeRecord>, StoreError> {
        let mut sql = format!("SELECT {} FROM resumes", SELECT_COLUMNS);
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(status) = status {
            sql.push_str(" WHERE ingestion_status = ?");
            params.push(Box::new(status.as_str()));
        }
        sql.push_str(" ORDER BY created_at DESC");

        let mut stmt = self.conn.prepare(&sql)?;
        let param_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();
        let records = stmt
            .query_map(&param_refs[..], Self::map_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }

    /// Count records, optionally filtered by status
    pub fn count(&self, status: Option<IngestionStatus>) -> Result<usize, StoreError> {
        let count: i64 = match status {
            Some(status) => self.conn.query_row(
                "SELECT COUNT(*) FROM resumes WHERE ingestion_status = ?1",
                params![status.as_str()],
                |row| row.get(0),
            )?,
            None => self
                .conn
                .query_row("SELECT COUNT(*) FROM resumes", [], |row| row.get(0))?,
        };
        Ok(count as usize)
    }

    /// Map a database row onto a [`ResumeRecord`]
    fn map_row(row: &Row<'_>) -> rusqlite::Result<ResumeRecord> {
        let status_str: String = row.get(6)?;
        let status = IngestionStatus::parse(&status_str).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                6,
                rusqlite::types::Type::Text,
                Box::new(StoreError::InvalidData(e)),
            )
        })?;

        let ingested_at: Option<i64> = row.get(11)?;

        Ok(ResumeRecord {
            resume_id: row.get(0)?,
            file_name: row.get(1)?,
            file_path: row.get(2)?,
            raw_content: row.get(3)?,
            cleaned_content: row.get(4)?,
            content_hash: row.get(5)?,
            status,
            graph_ingested: row.get(7)?,
            error_message: row.get(8)?,
            created_at: row.get::<_, i64>(9)? as u64,
            updated_at: row.get::<_, i64>(10)? as u64,
            ingested_at: ingested_at.map(|t| t as u64),
        })
    }
}
