//! HTTP fetcher for the analyzed page
//!
//! One GET per run, bounded by the configured timeout and never retried.
//! The outcome is classified so the orchestrator can stop before parsing
//! anything that did not come back as a successful response.

use crate::analyzer::AnalysisError;
use crate::config::UserAgentConfig;
use reqwest::{header::CONTENT_TYPE, redirect::Policy, Client};
use std::time::Duration;

/// Maximum redirect hops followed by both the page fetch and link probes
const MAX_REDIRECTS: usize = 10;

/// A successfully fetched page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub final_url: String,
    /// HTTP status code
    pub status_code: u16,
    /// Content-Type header value (empty if absent)
    pub content_type: String,
    /// Body decoded with the charset declared in Content-Type (UTF-8 if none)
    pub body: String,
}

/// Result of the primary page fetch
#[derive(Debug)]
pub enum FetchOutcome {
    /// Successfully fetched the page
    Success(FetchedPage),

    /// The server answered with a non-2xx status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (DNS failure, connection refused, timeout, ...)
    NetworkError {
        /// Error description
        error: String,
        /// Whether the request hit the timeout
        timed_out: bool,
    },
}

impl FetchOutcome {
    /// Converts the outcome into the fetched page or the error that ends the run
    pub fn into_result(self, url: &str) -> Result<FetchedPage, AnalysisError> {
        match self {
            Self::Success(page) => Ok(page),
            Self::HttpError { status_code } => Err(AnalysisError::HttpStatus {
                url: url.to_string(),
                status: status_code,
            }),
            Self::NetworkError {
                timed_out: true, ..
            } => Err(AnalysisError::Timeout {
                url: url.to_string(),
            }),
            Self::NetworkError { error, .. } => Err(AnalysisError::Transport {
                url: url.to_string(),
                message: error,
            }),
        }
    }
}

/// Builds an HTTP client with the given total request timeout
///
/// The same builder serves the page fetch and the link prober; they differ
/// only in their timeout.
///
/// # Example
///
/// ```no_run
/// use page_analyzer::analyzer::build_http_client;
/// use page_analyzer::config::UserAgentConfig;
/// use std::time::Duration;
///
/// let client = build_http_client(&UserAgentConfig::default(), Duration::from_secs(10)).unwrap();
/// ```
pub fn build_http_client(
    config: &UserAgentConfig,
    timeout: Duration,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.header_value())
        .timeout(timeout)
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches the page to analyze
///
/// | Condition | Outcome |
/// |-----------|---------|
/// | 2xx | Success (decoded body + Content-Type) |
/// | any other status | HttpError |
/// | timeout | NetworkError (timed_out) |
/// | DNS / connect / body read failure | NetworkError |
pub async fn fetch_url(client: &Client, url: &str) -> FetchOutcome {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => return classify_network_error(e),
    };

    let status = response.status();
    if !status.is_success() {
        return FetchOutcome::HttpError {
            status_code: status.as_u16(),
        };
    }

    let final_url = response.url().to_string();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    // Decodes using the Content-Type charset; undecodable bytes are replaced
    match response.text().await {
        Ok(body) => FetchOutcome::Success(FetchedPage {
            final_url,
            status_code: status.as_u16(),
            content_type,
            body,
        }),
        Err(e) => classify_network_error(e),
    }
}

fn classify_network_error(e: reqwest::Error) -> FetchOutcome {
    if e.is_timeout() {
        FetchOutcome::NetworkError {
            error: "Request timeout".to_string(),
            timed_out: true,
        }
    } else if e.is_connect() {
        FetchOutcome::NetworkError {
            error: format!("Connection failed: {}", e),
            timed_out: false,
        }
    } else {
        FetchOutcome::NetworkError {
            error: e.to_string(),
            timed_out: false,
        }
    }
}
