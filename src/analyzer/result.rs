//! Analysis result and its one-way lifecycle
//!
//! A run starts a [`RunningAnalysis`] (status `running`), fills it stage by
//! stage and consumes it exactly once with [`RunningAnalysis::finish`] or
//! [`RunningAnalysis::fail`]. The resulting [`AnalysisResult`] is a plain value.

use crate::analyzer::structure::{HeadingCounts, PageStructure};
use crate::analyzer::AnalysisError;
use crate::state::AnalysisStatus;

/// Outcome of one analysis run
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnalysisResult {
    pub status: AnalysisStatus,
    pub html_version: String,
    pub title: String,
    pub headings: HeadingCounts,
    pub internal_links: u32,
    pub external_links: u32,
    pub broken_links: u32,
    pub has_login_form: bool,
    /// Diagnostic for runs that ended in `error`
    pub error_message: Option<String>,
}

impl AnalysisResult {
    /// An empty result for a record that has not run yet
    pub fn queued() -> Self {
        Self::default()
    }

    /// Total number of links found on the page
    pub fn total_links(&self) -> u32 {
        self.internal_links + self.external_links
    }
}

/// A result under construction
#[derive(Debug)]
pub struct RunningAnalysis {
    result: AnalysisResult,
}

impl RunningAnalysis {
    /// Starts a run
    pub fn start() -> Self {
        Self {
            result: AnalysisResult {
                status: AnalysisStatus::Running,
                ..AnalysisResult::default()
            },
        }
    }

    pub fn status(&self) -> AnalysisStatus {
        self.result.status
    }

    pub fn record_structure(&mut self, structure: PageStructure) {
        self.result.html_version = structure.html_version;
        self.result.title = structure.title;
        self.result.headings = structure.headings;
    }

    pub fn record_links(&mut self, internal: u32, external: u32) {
        self.result.internal_links = internal;
        self.result.external_links = external;
    }

    /// Records the broken-link count
    ///
    /// Must be called after [`RunningAnalysis::record_links`]; at most one probe
    /// runs per link, so the count never exceeds the link total.
    pub fn record_broken_links(&mut self, broken: u32) {
        debug_assert!(
            broken <= self.result.total_links(),
            "{} broken links out of {}",
            broken,
            self.result.total_links()
        );
        self.result.broken_links = broken;
    }

    pub fn record_login_form(&mut self, has_login_form: bool) {
        self.result.has_login_form = has_login_form;
    }

    /// Finalizes a successful run
    pub fn finish(mut self) -> AnalysisResult {
        self.result.status = AnalysisStatus::Done;
        self.result
    }

    /// Finalizes a failed run
    ///
    /// Everything recorded so far is discarded; a failed result carries only
    /// its status and diagnostic.
    pub fn fail(self, error: &AnalysisError) -> AnalysisResult {
        AnalysisResult {
            status: AnalysisStatus::Error,
            error_message: Some(error.to_string()),
            ..AnalysisResult::default()
        }
    }
}
