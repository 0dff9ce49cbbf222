//! HTML document wrapper
//!
//! Parsing is lenient (html5ever via `scraper`): implicit and missing closing
//! tags are repaired. Bodies arrive already decoded by the fetcher, so the only
//! bodies refused are those that carry no content at all.

use crate::analyzer::AnalysisError;
use scraper::{ElementRef, Html, Selector};

const BOM: char = '\u{feff}';

/// A parsed HTML page
///
/// Owned by a single analysis run. The underlying tree is not `Send`, so a
/// document never crosses an await point in the orchestrator.
pub struct ParsedDocument {
    html: Html,
}

impl ParsedDocument {
    /// Parses a decoded body
    ///
    /// # Errors
    ///
    /// * `AnalysisError::Parse` - the body is empty or whitespace only
    pub fn parse(body: &str) -> Result<Self, AnalysisError> {
        let text = body.strip_prefix(BOM).unwrap_or(body);

        if text.trim().is_empty() {
            return Err(AnalysisError::Parse("empty document".to_string()));
        }

        Ok(Self::from_html(text))
    }

    /// Parses an HTML string without any validation
    pub fn from_html(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    /// Returns every element matching a CSS selector, in document order
    ///
    /// An invalid selector matches nothing.
    pub fn select(&self, selector: &str) -> Vec<ElementRef<'_>> {
        match Selector::parse(selector) {
            Ok(selector) => self.html.select(&selector).collect(),
            Err(e) => {
                tracing::debug!("Invalid selector '{}': {:?}", selector, e);
                Vec::new()
            }
        }
    }

    /// Returns every element with the given tag name
    pub fn find_by_tag(&self, tag: &str) -> Vec<ElementRef<'_>> {
        self.select(tag)
    }

    /// Counts elements matching a CSS selector
    pub fn count(&self, selector: &str) -> usize {
        self.select(selector).len()
    }

    /// Text content of the first element matching a selector
    pub fn first_text(&self, selector: &str) -> Option<String> {
        self.select(selector).first().map(|el| text_of(*el))
    }
}

/// Returns descendants of `element` matching a CSS selector
pub fn select_within<'a>(element: ElementRef<'a>, selector: &str) -> Vec<ElementRef<'a>> {
    match Selector::parse(selector) {
        Ok(selector) => element.select(&selector).collect(),
        Err(_) => Vec::new(),
    }
}

/// Concatenated text content of an element
pub fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Looks up an attribute value on an element
pub fn attr<'a>(element: ElementRef<'a>, name: &str) -> Option<&'a str> {
    element.value().attr(name)
}
