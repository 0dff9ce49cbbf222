//! Link extraction and internal/external classification
//!
//! Every `<a>` with a non-empty `href` contributes exactly one link. Links are
//! not deduplicated by destination: two anchors pointing at the same URL count
//! twice.

use crate::analyzer::parser::{attr, ParsedDocument};
use crate::url::is_same_host;
use url::Url;

/// Whether a link stays on the analyzed host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkLocality {
    Internal,
    External,
}

/// A resolved link found on the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRecord {
    /// Absolute URL after resolution against the page URL
    pub url: String,
    pub locality: LinkLocality,
}

impl LinkRecord {
    pub fn is_internal(&self) -> bool {
        self.locality == LinkLocality::Internal
    }
}

/// Extracts and classifies all anchor links on the page
///
/// Relative hrefs are resolved against `base_url` per RFC 3986. Hrefs that do
/// not parse are skipped. A link is internal when its host and port equal the
/// base's, ignoring case in the host.
///
/// # Example
///
/// ```
/// use page_analyzer::analyzer::{classify_links, ParsedDocument};
/// use url::Url;
///
/// let doc = ParsedDocument::from_html(r#"<a href="/about">About</a>"#);
/// let base = Url::parse("http://ex.com/x/y").unwrap();
/// let links = classify_links(&doc, &base);
/// assert_eq!(links[0].url, "http://ex.com/about");
/// assert!(links[0].is_internal());
/// ```
pub fn classify_links(document: &ParsedDocument, base_url: &Url) -> Vec<LinkRecord> {
    document
        .select("a[href]")
        .into_iter()
        .filter_map(|anchor| attr(anchor, "href"))
        .filter(|href| !href.is_empty())
        .filter_map(|href| resolve_link(href, base_url))
        .map(|resolved| {
            let locality = if is_same_host(&resolved, base_url) {
                LinkLocality::Internal
            } else {
                LinkLocality::External
            };
            LinkRecord {
                url: resolved.to_string(),
                locality,
            }
        })
        .collect()
}

/// Resolves an href against the page URL
///
/// Absolute hrefs are returned as parsed; anything else is joined onto the
/// base. Returns None if the href cannot be parsed.
fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    match base_url.join(href) {
        Ok(url) => Some(url),
        Err(e) => {
            tracing::debug!("Skipping unparseable href '{}': {}", href, e);
            None
        }
    }
}

/// Counts links as `(internal, external)`
pub fn count_by_locality(links: &[LinkRecord]) -> (u32, u32) {
    links.iter().fold((0, 0), |(internal, external), link| {
        if link.is_internal() {
            (internal + 1, external)
        } else {
            (internal, external + 1)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        Url::parse("http://ex.com/x/y").unwrap()
    }

    fn classify(html: &str) -> Vec<LinkRecord> {
        classify_links(&ParsedDocument::from_html(html), &base_url())
    }

    #[test]
    fn test_absolute_path_resolves_against_host() {
        let links = classify(r#"<a href="/about">About</a>"#);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].url, "http://ex.com/about");
        assert_eq!(links[0].locality, LinkLocality::Internal);
    }

    #[test]
    fn test_relative_path_merges_with_base_directory() {
        let links = classify(r#"<a href="z">Z</a><a href="../up">Up</a>"#);
        assert_eq!(links[0].url, "http://ex.com/x/z");
        assert_eq!(links[1].url, "http://ex.com/up");
    }

    #[test]
    fn test_external_link() {
        let links = classify(r#"<a href="https://other.org/page">Other</a>"#);
        assert_eq!(links[0].locality, LinkLocality::External);
    }

    #[test]
    fn test_host_comparison_ignores_case() {
        let links = classify(r#"<a href="HTTP://EX.COM/Page">Same</a>"#);
        assert_eq!(links[0].locality, LinkLocality::Internal);
    }

    #[test]
    fn test_port_decides_locality() {
        let base = Url::parse("http://ex.com:8080/x").unwrap();
        let doc = ParsedDocument::from_html(
            r#"<a href="http://ex.com/">default</a>
            <a href="http://ex.com:9090/">other</a>
            <a href="http://ex.com:8080/y">same</a>
            <a href="/z">relative</a>"#,
        );

        let links = classify_links(&doc, &base);
        assert_eq!(count_by_locality(&links), (2, 2));
        assert_eq!(links[0].locality, LinkLocality::External);
        assert_eq!(links[1].locality, LinkLocality::External);
        assert_eq!(links[3].url, "http://ex.com:8080/z");
    }

    #[test]
    fn test_subdomain_is_external() {
        let links = classify(r#"<a href="http://www.ex.com/">www</a>"#);
        assert_eq!(links[0].locality, LinkLocality::External);
    }

    #[test]
    fn test_empty_and_missing_href_skipped() {
        let links = classify(r#"<a href="">Empty</a><a>None</a><a name="x">Anchor</a>"#);
        assert!(links.is_empty());
    }

    #[test]
    fn test_unparseable_href_skipped() {
        let links = classify(r#"<a href="http://[::1">Bad</a><a href="/ok">Ok</a>"#);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].url, "http://ex.com/ok");
    }

    #[test]
    fn test_duplicates_count_per_occurrence() {
        let links = classify(
            r#"<a href="/a">1</a><a href="/a">2</a><a href="http://ex.com/a">3</a>"#,
        );
        assert_eq!(links.len(), 3);
        assert_eq!(count_by_locality(&links), (3, 0));
    }

    #[test]
    fn test_non_http_schemes_are_external() {
        let links = classify(r#"<a href="mailto:me@ex.com">Mail</a><a href="tel:+123">Call</a>"#);
        assert_eq!(links.len(), 2);
        assert_eq!(count_by_locality(&links), (0, 2));
    }

    #[test]
    fn test_fragment_link_is_internal() {
        let links = classify(r##"<a href="#top">Top</a>"##);
        assert_eq!(links[0].url, "http://ex.com/x/y#top");
        assert!(links[0].is_internal());
    }

    #[test]
    fn test_counts_match_anchor_total() {
        let links = classify(
            r#"
            <nav><a href="/">Home</a><a href="/docs">Docs</a></nav>
            <main><a href="https://github.com/x">GitHub</a><a href="">skip</a></main>
            <footer><a href="//cdn.other.net/x.js">CDN</a></footer>
            "#,
        );
        let (internal, external) = count_by_locality(&links);
        assert_eq!(internal, 2);
        assert_eq!(external, 2);
        assert_eq!((internal + external) as usize, links.len());
    }
}
