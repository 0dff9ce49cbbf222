//! Concurrent link prober
//!
//! Sends one HEAD request per link, all at once, each bounded by its own
//! timeout. Broken links are tallied in a shared atomic counter.

use crate::analyzer::build_http_client;
use crate::analyzer::links::LinkRecord;
use crate::config::UserAgentConfig;
use reqwest::Client;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;

/// Result of probing a single link
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The target answered with a status below 400
    Reachable { status_code: u16 },

    /// The target answered with a status of 400 or above
    BrokenStatus { status_code: u16 },

    /// The probe failed (timeout, DNS, connection refused, unsupported scheme)
    Failed { error: String },
}

impl ProbeOutcome {
    pub fn is_broken(&self) -> bool {
        !matches!(self, Self::Reachable { .. })
    }
}

/// Probes page links for existence
#[derive(Debug, Clone)]
pub struct LinkProber {
    client: Client,
}

impl LinkProber {
    /// Creates a prober whose requests each time out after `timeout`
    pub fn new(user_agent: &UserAgentConfig, timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(user_agent, timeout)?,
        })
    }

    /// Probes every link concurrently and returns the broken-link count
    ///
    /// All probes run to completion; a failing probe never cancels the others.
    /// A probe task that panics counts as broken.
    pub async fn probe_all(&self, links: &[LinkRecord]) -> u32 {
        let broken = Arc::new(AtomicU32::new(0));
        let mut tasks = JoinSet::new();

        for link in links {
            let client = self.client.clone();
            let url = link.url.clone();
            let broken = Arc::clone(&broken);

            tasks.spawn(async move {
                let outcome = probe_link(&client, &url).await;
                if outcome.is_broken() {
                    tracing::debug!("Broken link {}: {:?}", url, outcome);
                    broken.fetch_add(1, Ordering::Relaxed);
                }
            });
        }

        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                tracing::warn!("Link probe task failed: {}", e);
                broken.fetch_add(1, Ordering::Relaxed);
            }
        }

        broken.load(Ordering::Acquire)
    }
}

/// Probes a single link with a HEAD request
pub async fn probe_link(client: &Client, url: &str) -> ProbeOutcome {
    match client.head(url).send().await {
        Ok(response) => {
            let status_code = response.status().as_u16();
            if status_code >= 400 {
                ProbeOutcome::BrokenStatus { status_code }
            } else {
                ProbeOutcome::Reachable { status_code }
            }
        }
        Err(e) if e.is_timeout() => ProbeOutcome::Failed {
            error: "Request timeout".to_string(),
        },
        Err(e) => ProbeOutcome::Failed {
            error: e.to_string(),
        },
    }
}
