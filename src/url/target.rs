use crate::{UrlError, UrlResult};
use std::fmt;
use url::Url;

/// A page submitted for analysis
///
/// Holds the raw string as submitted and its parsed form, which serves as the
/// base URL for resolving relative links. Only absolute `http`/`https` URLs with
/// a host are accepted; no scheme is ever assumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisTarget {
    raw: String,
    base: Url,
}

impl AnalysisTarget {
    /// Parses and validates a submitted URL
    ///
    /// # Examples
    ///
    /// ```
    /// use page_analyzer::url::AnalysisTarget;
    ///
    /// let target = AnalysisTarget::parse("http://ex.com/x/y").unwrap();
    /// assert_eq!(target.host(), "ex.com");
    ///
    /// assert!(AnalysisTarget::parse("ex.com/x/y").is_err());
    /// ```
    pub fn parse(raw: &str) -> UrlResult<Self> {
        let trimmed = raw.trim();
        let base = Url::parse(trimmed).map_err(|source| UrlError::Parse {
            url: trimmed.to_string(),
            source,
        })?;

        if base.scheme() != "http" && base.scheme() != "https" {
            return Err(UrlError::InvalidScheme(base.scheme().to_string()));
        }

        if base.host_str().map_or(true, str::is_empty) {
            return Err(UrlError::MissingHost(trimmed.to_string()));
        }

        Ok(Self {
            raw: trimmed.to_string(),
            base,
        })
    }

    /// The URL string as submitted (whitespace trimmed)
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The parsed base URL
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// The host of the base URL
    pub fn host(&self) -> &str {
        self.base.host_str().unwrap_or_default()
    }
}

impl fmt::Display for AnalysisTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
