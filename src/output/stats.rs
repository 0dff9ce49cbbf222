//! Status statistics from the analysis database
//!
//! This module counts stored records per status and prints the totals.

use crate::state::AnalysisStatus;
use crate::storage::AnalysisStore;
use crate::AnalyzerError;
use std::collections::HashMap;

/// Record counts by status
#[derive(Debug, Clone, Default)]
pub struct AnalysisStatistics {
    /// Total number of stored records
    pub total_records: u64,

    /// Count of records by status (statuses with no records are omitted)
    pub records_by_status: HashMap<AnalysisStatus, u64>,
}

impl AnalysisStatistics {
    /// Number of records in `status`
    pub fn count(&self, status: AnalysisStatus) -> u64 {
        self.records_by_status.get(&status).copied().unwrap_or(0)
    }

    /// Percentage of finished records that completed without error
    pub fn success_rate(&self) -> f64 {
        let done = self.count(AnalysisStatus::Done);
        let finished = done + self.count(AnalysisStatus::Error);
        if finished == 0 {
            0.0
        } else {
            (done as f64 / finished as f64) * 100.0
        }
    }
}

/// Loads statistics from the store
///
/// # Arguments
///
/// * `store` - The store to query
///
/// # Returns
///
/// * `Ok(AnalysisStatistics)` - Successfully loaded statistics
/// * `Err(AnalyzerError)` - Failed to query the store
pub fn load_statistics(store: &dyn AnalysisStore) -> Result<AnalysisStatistics, AnalyzerError> {
    let mut stats = AnalysisStatistics::default();

    for status in AnalysisStatus::all_states() {
        let count = store.count_by_status(status)?;
        stats.total_records += count;
        if count > 0 {
            stats.records_by_status.insert(status, count);
        }
    }

    Ok(stats)
}

/// Prints statistics to stdout
pub fn print_statistics(stats: &AnalysisStatistics) {
    println!("=== Analysis Statistics ===\n");
    println!("Total records: {}", stats.total_records);

    for status in AnalysisStatus::all_states() {
        println!("  {}: {}", status, stats.count(status));
    }
    println!();

    println!("Success Rate: {:.1}%", stats.success_rate());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::AnalysisResult;
    use crate::storage::SqliteStorage;

    #[test]
    fn test_load_statistics() {
        let storage = SqliteStorage::new_in_memory().unwrap();
        let a = storage.create_record("https://a.example/").unwrap();
        let b = storage.create_record("https://b.example/").unwrap();
        storage.create_record("https://c.example/").unwrap();

        storage.mark_running(a).unwrap();
        storage
            .save_result(
                a,
                &AnalysisResult {
                    status: AnalysisStatus::Done,
                    ..AnalysisResult::default()
                },
            )
            .unwrap();
        storage.mark_running(b).unwrap();

        let stats = load_statistics(&storage).unwrap();
        assert_eq!(stats.total_records, 3);
        assert_eq!(stats.count(AnalysisStatus::Queued), 1);
        assert_eq!(stats.count(AnalysisStatus::Running), 1);
        assert_eq!(stats.count(AnalysisStatus::Done), 1);
        assert_eq!(stats.count(AnalysisStatus::Error), 0);
        assert!(!stats.records_by_status.contains_key(&AnalysisStatus::Error));
    }

    #[test]
    fn test_success_rate() {
        let mut stats = AnalysisStatistics::default();
        assert_eq!(stats.success_rate(), 0.0);

        stats.records_by_status.insert(AnalysisStatus::Done, 3);
        stats.records_by_status.insert(AnalysisStatus::Error, 1);
        stats.records_by_status.insert(AnalysisStatus::Queued, 10);
        assert_eq!(stats.success_rate(), 75.0);
    }
}
