//! Page analysis engine
//!
//! This module contains the single-page analysis pipeline:
//! - Fetching the page with a bounded timeout
//! - Parsing the body into a queryable document
//! - Counting headings and reading the title
//! - Classifying links as internal/external and probing them concurrently
//! - Detecting login forms
//! - Orchestrating the run and handing the result to the persistence port

mod fetcher;
mod links;
mod login;
mod orchestrator;
mod parser;
mod prober;
mod result;
mod structure;

pub use fetcher::{build_http_client, fetch_url, FetchOutcome, FetchedPage};
pub use links::{classify_links, count_by_locality, LinkLocality, LinkRecord};
pub use login::{detect_login_form, LOGIN_KEYWORDS};
pub use orchestrator::{AnalysisHandle, Orchestrator};
pub use parser::ParsedDocument;
pub use prober::{probe_link, LinkProber, ProbeOutcome};
pub use result::{AnalysisResult, RunningAnalysis};
pub use structure::{analyze_structure, html_version_label, HeadingCounts, PageStructure};

use thiserror::Error;

/// Errors that end an analysis run
///
/// Link probe failures are not listed here: they are recovered per link and
/// only show up in the broken-link count.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Transport error for {url}: {message}")]
    Transport { url: String, message: String },

    #[error("HTTP status {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("HTML parse error: {0}")]
    Parse(String),
}

impl AnalysisError {
    /// Returns true for failures below the HTTP layer (DNS, connect, timeout)
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::Transport { .. })
    }
}
