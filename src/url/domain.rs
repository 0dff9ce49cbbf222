use url::Url;

/// Extracts the domain from a URL
///
/// This function retrieves the host portion of a URL and converts it to lowercase.
/// The port is not part of the result.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use page_analyzer::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Returns true if both URLs have the same host and port
///
/// Hosts compare case-insensitively. A missing port is replaced by the
/// scheme's default, so `http://ex.com/` and `http://ex.com:80/` match while
/// `http://ex.com:8080/` does not. A URL without a host never matches.
pub fn is_same_host(a: &Url, b: &Url) -> bool {
    match (extract_domain(a), extract_domain(b)) {
        (Some(host_a), Some(host_b)) => {
            host_a == host_b && a.port_or_known_default() == b.port_or_known_default()
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_extract_simple_domain() {
        assert_eq!(
            extract_domain(&url("https://example.com/")),
            Some("example.com".to_string())
        );
    }

    #[test]
    fn test_extract_with_port() {
        assert_eq!(
            extract_domain(&url("https://example.com:8080/")),
            Some("example.com".to_string())
        );
    }

    #[test]
    fn test_extract_mixed_case() {
        assert_eq!(
            extract_domain(&url("https://Example.COM/")),
            Some("example.com".to_string())
        );
    }

    #[test]
    fn test_extract_no_host() {
        assert_eq!(extract_domain(&url("mailto:someone@example.com")), None);
    }

    #[test]
    fn test_same_host() {
        assert!(is_same_host(
            &url("http://ex.com/x/y"),
            &url("http://EX.com/about")
        ));
        assert!(is_same_host(
            &url("http://ex.com/"),
            &url("http://ex.com:80/")
        ));
        assert!(is_same_host(
            &url("http://ex.com:8080/a"),
            &url("http://ex.com:8080/b")
        ));
    }

    #[test]
    fn test_port_is_part_of_host() {
        assert!(!is_same_host(
            &url("http://ex.com/"),
            &url("http://ex.com:8080/")
        ));
        assert!(!is_same_host(
            &url("http://ex.com:8080/"),
            &url("http://ex.com:9090/")
        ));
        // Different default ports
        assert!(!is_same_host(
            &url("http://ex.com/"),
            &url("https://ex.com/")
        ));
    }

    #[test]
    fn test_different_host() {
        assert!(!is_same_host(
            &url("http://ex.com/"),
            &url("http://www.ex.com/")
        ));
        assert!(!is_same_host(
            &url("http://ex.com/"),
            &url("mailto:a@ex.com")
        ));
    }
}
