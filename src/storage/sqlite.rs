//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the AnalysisStore trait.

use crate::analyzer::{AnalysisResult, HeadingCounts};
use crate::state::AnalysisStatus;
use crate::storage::schema::initialize_schema;
use crate::storage::traits::{AnalysisStore, StorageError, StorageResult};
use crate::storage::UrlRecord;
use crate::AnalyzerError;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

const RECORD_COLUMNS: &str = "id, address, status, title, html_version, h1, h2, h3, h4, h5, h6,
     internal_links, external_links, broken_links, has_login_form, error_message,
     created_at, updated_at";

/// SQLite storage backend
///
/// The connection sits behind a mutex so one store can be shared by every
/// running analysis.
pub struct SqliteStorage {
    conn: Mutex<Connection>,
}

impl SqliteStorage {
    /// Opens or creates a database file
    pub fn new(path: &Path) -> Result<Self, AnalyzerError> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Creates an in-memory database (for testing)
    #[cfg(test)]
    pub fn new_in_memory() -> Result<Self, AnalyzerError> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> StorageResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| StorageError::Database("connection lock poisoned".to_string()))
    }

    /// Builds the error for an update that matched no row in the expected status
    fn transition_error(conn: &Connection, id: i64, to: AnalysisStatus) -> StorageError {
        let current: Result<Option<String>, _> = conn
            .query_row("SELECT status FROM urls WHERE id = ?1", params![id], |row| {
                row.get(0)
            })
            .optional();

        match current {
            Ok(Some(status)) => StorageError::InvalidTransition {
                id,
                from: AnalysisStatus::from_db_string(&status).unwrap_or_default(),
                to,
            },
            Ok(None) => StorageError::RecordNotFound(id),
            Err(e) => StorageError::Sqlite(e),
        }
    }
}

fn row_to_record(row: &Row<'_>) -> rusqlite::Result<UrlRecord> {
    let status: String = row.get(2)?;
    Ok(UrlRecord {
        id: row.get(0)?,
        address: row.get(1)?,
        result: AnalysisResult {
            status: AnalysisStatus::from_db_string(&status).unwrap_or(AnalysisStatus::Error),
            title: row.get(3)?,
            html_version: row.get(4)?,
            headings: HeadingCounts::from_levels([
                row.get(5)?,
                row.get(6)?,
                row.get(7)?,
                row.get(8)?,
                row.get(9)?,
                row.get(10)?,
            ]),
            internal_links: row.get(11)?,
            external_links: row.get(12)?,
            broken_links: row.get(13)?,
            has_login_form: row.get(14)?,
            error_message: row.get(15)?,
        },
        created_at: row.get(16)?,
        updated_at: row.get(17)?,
    })
}

impl AnalysisStore for SqliteStorage {
    fn create_record(&self, address: &str) -> StorageResult<i64> {
        let conn = self.conn()?;
        let now = Utc::now().to_rfc3339();
        conn.execute(
            "INSERT INTO urls (address, status, created_at, updated_at) VALUES (?1, ?2, ?3, ?3)",
            params![address, AnalysisStatus::Queued.to_db_string(), now],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn get_record(&self, id: i64) -> StorageResult<Option<UrlRecord>> {
        let conn = self.conn()?;
        let record = conn
            .query_row(
                &format!("SELECT {} FROM urls WHERE id = ?1", RECORD_COLUMNS),
                params![id],
                row_to_record,
            )
            .optional()?;
        Ok(record)
    }

    fn list_records(&self) -> StorageResult<Vec<UrlRecord>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!("SELECT {} FROM urls ORDER BY id", RECORD_COLUMNS))?;
        let records = stmt
            .query_map([], row_to_record)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    fn delete_record(&self, id: i64) -> StorageResult<bool> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM urls WHERE id = ?1", params![id])?;
        Ok(deleted > 0)
    }

    fn delete_records(&self, ids: &[i64]) -> StorageResult<usize> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        let mut deleted = 0;
        for id in ids {
            deleted += tx.execute("DELETE FROM urls WHERE id = ?1", params![id])?;
        }
        tx.commit()?;
        Ok(deleted)
    }

    fn reset_record(&self, id: i64) -> StorageResult<bool> {
        let conn = self.conn()?;
        let now = Utc::now().to_rfc3339();
        let updated = conn.execute(
            "UPDATE urls SET status = ?1, title = '', html_version = '',
             h1 = 0, h2 = 0, h3 = 0, h4 = 0, h5 = 0, h6 = 0,
             internal_links = 0, external_links = 0, broken_links = 0,
             has_login_form = 0, error_message = NULL, updated_at = ?2
             WHERE id = ?3 AND status IN (?4, ?5)",
            params![
                AnalysisStatus::Queued.to_db_string(),
                now,
                id,
                AnalysisStatus::Done.to_db_string(),
                AnalysisStatus::Error.to_db_string()
            ],
        )?;

        if updated == 0 {
            return match Self::transition_error(&conn, id, AnalysisStatus::Queued) {
                StorageError::RecordNotFound(_) => Ok(false),
                e => Err(e),
            };
        }
        Ok(true)
    }

    fn mark_running(&self, id: i64) -> StorageResult<()> {
        let conn = self.conn()?;
        let now = Utc::now().to_rfc3339();
        let updated = conn.execute(
            "UPDATE urls SET status = ?1, updated_at = ?2 WHERE id = ?3 AND status = ?4",
            params![
                AnalysisStatus::Running.to_db_string(),
                now,
                id,
                AnalysisStatus::Queued.to_db_string()
            ],
        )?;

        if updated == 0 {
            return Err(Self::transition_error(&conn, id, AnalysisStatus::Running));
        }
        Ok(())
    }

    fn save_result(&self, id: i64, result: &AnalysisResult) -> StorageResult<()> {
        if !AnalysisStatus::Running.can_transition_to(result.status) {
            return Err(StorageError::InvalidTransition {
                id,
                from: AnalysisStatus::Running,
                to: result.status,
            });
        }

        let conn = self.conn()?;
        let now = Utc::now().to_rfc3339();
        let h = &result.headings;
        let updated = conn.execute(
            "UPDATE urls SET status = ?1, title = ?2, html_version = ?3,
             h1 = ?4, h2 = ?5, h3 = ?6, h4 = ?7, h5 = ?8, h6 = ?9,
             internal_links = ?10, external_links = ?11, broken_links = ?12,
             has_login_form = ?13, error_message = ?14, updated_at = ?15
             WHERE id = ?16 AND status = ?17",
            params![
                result.status.to_db_string(),
                result.title,
                result.html_version,
                h.h1,
                h.h2,
                h.h3,
                h.h4,
                h.h5,
                h.h6,
                result.internal_links,
                result.external_links,
                result.broken_links,
                result.has_login_form,
                result.error_message,
                now,
                id,
                AnalysisStatus::Running.to_db_string(),
            ],
        )?;

        if updated == 0 {
            return Err(Self::transition_error(&conn, id, result.status));
        }
        Ok(())
    }

    fn count_by_status(&self, status: AnalysisStatus) -> StorageResult<u64> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM urls WHERE status = ?1",
            params![status.to_db_string()],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }
}
