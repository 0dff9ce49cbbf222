//! Storage module for persisting analysis records
//!
//! This module defines the persistence port the orchestrator writes through
//! and its SQLite implementation:
//! - Record creation when a URL is submitted (status `queued`)
//! - Status updates as a run starts and finishes
//! - Listing, lookup, deletion and reset for re-analysis

mod schema;
mod sqlite;
mod traits;

pub use sqlite::SqliteStorage;
pub use traits::{AnalysisStore, StorageError, StorageResult};

use crate::analyzer::AnalysisResult;
use crate::AnalyzerError;
use std::path::Path;

/// Opens (or creates) the SQLite store at `path`
pub fn open_storage(path: &Path) -> Result<SqliteStorage, AnalyzerError> {
    SqliteStorage::new(path)
}

/// A submitted URL together with its latest analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlRecord {
    pub id: i64,
    pub address: String,
    pub result: AnalysisResult,
    pub created_at: String,
    pub updated_at: String,
}
