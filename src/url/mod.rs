//! URL handling module for Page Analyzer
//!
//! This module validates submitted page URLs and provides the host comparison
//! used to split a page's links into internal and external.

mod domain;
mod target;

pub use domain::{extract_domain, is_same_host};
pub use target::AnalysisTarget;
