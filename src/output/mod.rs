//! Output module for presenting analysis results
//!
//! This module handles:
//! - Rendering single results and stored records as plain text
//! - Summarizing the store by record status

mod report;
pub mod stats;

pub use report::{
    format_record, format_record_line, format_result, print_record, print_records, print_result,
};
pub use stats::{load_statistics, print_statistics, AnalysisStatistics};
