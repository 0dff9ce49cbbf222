//! Structural analysis: headings, title and HTML version label

use crate::analyzer::parser::ParsedDocument;

/// Label used when the response declares an HTML content type
pub const HTML5_LABEL: &str = "HTML5";

/// Label used for anything else
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Number of heading elements per level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeadingCounts {
    pub h1: u32,
    pub h2: u32,
    pub h3: u32,
    pub h4: u32,
    pub h5: u32,
    pub h6: u32,
}

impl HeadingCounts {
    /// Builds counts from an array indexed by level - 1
    pub fn from_levels(levels: [u32; 6]) -> Self {
        let [h1, h2, h3, h4, h5, h6] = levels;
        Self {
            h1,
            h2,
            h3,
            h4,
            h5,
            h6,
        }
    }

    /// Returns the counts as an array indexed by level - 1
    pub fn levels(&self) -> [u32; 6] {
        [self.h1, self.h2, self.h3, self.h4, self.h5, self.h6]
    }

    pub fn total(&self) -> u32 {
        self.levels().iter().sum()
    }
}

/// Structural facts about a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageStructure {
    pub html_version: String,
    pub title: String,
    pub headings: HeadingCounts,
}

/// Analyzes headings, title and HTML version
///
/// Headings are a flat count per tag name regardless of nesting. The title is
/// the trimmed text of the first `<title>`, or empty.
pub fn analyze_structure(document: &ParsedDocument, content_type: &str) -> PageStructure {
    let mut levels = [0u32; 6];
    for (index, count) in levels.iter_mut().enumerate() {
        *count = document.count(&format!("h{}", index + 1)) as u32;
    }

    let title = document
        .first_text("title")
        .map(|t| t.trim().to_string())
        .unwrap_or_default();

    PageStructure {
        html_version: html_version_label(content_type).to_string(),
        title,
        headings: HeadingCounts::from_levels(levels),
    }
}

/// Labels the HTML version from the declared Content-Type
///
/// Coarse on purpose: any content type mentioning `html` is labeled HTML5.
pub fn html_version_label(content_type: &str) -> &'static str {
    if content_type.to_ascii_lowercase().contains("html") {
        HTML5_LABEL
    } else {
        UNKNOWN_LABEL
    }
}
