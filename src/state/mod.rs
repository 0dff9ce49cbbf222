//! State module for tracking analysis progress
//!
//! # Components
//!
//! - `AnalysisStatus`: lifecycle of one analysis run (queued, running, done, error)

mod analysis_status;

pub use analysis_status::AnalysisStatus;
