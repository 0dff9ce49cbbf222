//! Persistence port and associated error types
//!
//! The orchestrator only sees [`AnalysisStore`]; the SQLite backend is one
//! implementation of it.

use crate::analyzer::AnalysisResult;
use crate::state::AnalysisStatus;
use crate::storage::UrlRecord;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Record not found: {0}")]
    RecordNotFound(i64),

    #[error("Invalid status transition for record {id}: {from} -> {to}")]
    InvalidTransition {
        id: i64,
        from: AnalysisStatus,
        to: AnalysisStatus,
    },

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Persistence port for analysis records
///
/// Implementations are shared between concurrently running analyses and must
/// be thread-safe. Writes to one record follow last-write-wins; nothing is
/// ordered across records.
pub trait AnalysisStore: Send + Sync {
    /// Creates a record for a submitted URL with status `queued`
    ///
    /// # Returns
    ///
    /// The ID of the new record
    fn create_record(&self, address: &str) -> StorageResult<i64>;

    /// Gets a record by ID
    fn get_record(&self, id: i64) -> StorageResult<Option<UrlRecord>>;

    /// Lists all records, oldest first
    fn list_records(&self) -> StorageResult<Vec<UrlRecord>>;

    /// Deletes a record; returns false if it did not exist
    fn delete_record(&self, id: i64) -> StorageResult<bool>;

    /// Deletes several records; returns how many existed
    fn delete_records(&self, ids: &[i64]) -> StorageResult<usize>;

    /// Clears all analysis fields and puts a finished record back to `queued`
    ///
    /// Returns false if the record does not exist.
    ///
    /// # Errors
    ///
    /// * `InvalidTransition` - the record is still `queued` or `running`
    fn reset_record(&self, id: i64) -> StorageResult<bool>;

    /// Moves a `queued` record to `running`
    ///
    /// # Errors
    ///
    /// * `RecordNotFound` - no such record
    /// * `InvalidTransition` - the record is not `queued`
    fn mark_running(&self, id: i64) -> StorageResult<()>;

    /// Writes the finalized result of a `running` record in one update
    ///
    /// # Errors
    ///
    /// * `RecordNotFound` - no such record
    /// * `InvalidTransition` - the record is not `running` or the result is
    ///   not terminal
    fn save_result(&self, id: i64, result: &AnalysisResult) -> StorageResult<()>;

    /// Counts records with the given status
    fn count_by_status(&self, status: AnalysisStatus) -> StorageResult<u64>;
}
