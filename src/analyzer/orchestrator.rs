//! Analysis orchestrator - sequences one run of the pipeline
//!
//! A run moves `queued -> running -> {done, error}`:
//! - Fetch the page (failure ends the run with `error`)
//! - Parse it (failure ends the run with `error`)
//! - Analyze structure, classify links, detect login forms
//! - Probe every link concurrently and wait for all probes
//! - Finalize the result once and hand it to the store

use crate::analyzer::fetcher::{build_http_client, fetch_url, FetchedPage};
use crate::analyzer::links::{classify_links, count_by_locality, LinkRecord};
use crate::analyzer::login::detect_login_form;
use crate::analyzer::parser::ParsedDocument;
use crate::analyzer::prober::LinkProber;
use crate::analyzer::result::{AnalysisResult, RunningAnalysis};
use crate::analyzer::structure::{analyze_structure, PageStructure};
use crate::analyzer::AnalysisError;
use crate::config::{Config, UserAgentConfig};
use crate::storage::{AnalysisStore, StorageError};
use crate::url::AnalysisTarget;
use crate::AnalyzerError;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use url::Url;

/// Handle to a spawned analysis run
///
/// Awaiting it yields the finalized result once it has been stored. Dropping
/// it detaches the run, which still completes and persists its result.
pub type AnalysisHandle = JoinHandle<Result<AnalysisResult, AnalyzerError>>;

/// Everything read from the parsed document
///
/// Built synchronously so the document itself never lives across an await.
struct PageInspection {
    structure: PageStructure,
    links: Vec<LinkRecord>,
    has_login_form: bool,
}

/// Runs page analyses and writes their results through the persistence port
#[derive(Clone)]
pub struct Orchestrator {
    client: Client,
    prober: LinkProber,
    store: Arc<dyn AnalysisStore>,
}

impl Orchestrator {
    /// Creates an orchestrator from configuration
    ///
    /// # Arguments
    ///
    /// * `config` - Timeouts and user agent
    /// * `store` - Where records are created and results are written
    pub fn new(config: &Config, store: Arc<dyn AnalysisStore>) -> Result<Self, AnalyzerError> {
        Self::with_timeouts(
            &config.user_agent,
            Duration::from_secs(config.analyzer.fetch_timeout_secs),
            Duration::from_secs(config.analyzer.probe_timeout_secs),
            store,
        )
    }

    /// Creates an orchestrator with explicit fetch and probe timeouts
    pub fn with_timeouts(
        user_agent: &UserAgentConfig,
        fetch_timeout: Duration,
        probe_timeout: Duration,
        store: Arc<dyn AnalysisStore>,
    ) -> Result<Self, AnalyzerError> {
        Ok(Self {
            client: build_http_client(user_agent, fetch_timeout)?,
            prober: LinkProber::new(user_agent, probe_timeout)?,
            store,
        })
    }

    /// The persistence port this orchestrator writes to
    pub fn store(&self) -> &Arc<dyn AnalysisStore> {
        &self.store
    }

    /// Runs the pipeline for one target without touching the store
    pub async fn analyze(&self, target: &AnalysisTarget) -> AnalysisResult {
        let mut running = RunningAnalysis::start();
        tracing::info!("Starting analysis of {}", target);

        let page = match fetch_url(&self.client, target.raw())
            .await
            .into_result(target.raw())
        {
            Ok(page) => page,
            Err(e) => return fail_run(running, target, e),
        };
        if page.final_url != target.base_url().as_str() {
            tracing::debug!(
                "{} redirected to {} (HTTP {})",
                target,
                page.final_url,
                page.status_code
            );
        }

        let inspection = match inspect_page(&page, target.base_url()) {
            Ok(inspection) => inspection,
            Err(e) => return fail_run(running, target, e),
        };

        let (internal, external) = count_by_locality(&inspection.links);
        running.record_structure(inspection.structure);
        running.record_links(internal, external);
        running.record_login_form(inspection.has_login_form);

        let broken = self.prober.probe_all(&inspection.links).await;
        running.record_broken_links(broken);

        let result = running.finish();
        tracing::info!(
            "Completed analysis of {}: Internal: {}, External: {}, Broken: {}",
            target,
            result.internal_links,
            result.external_links,
            result.broken_links
        );
        result
    }

    /// Runs the pipeline for a raw address
    ///
    /// An address that is not a valid `http`/`https` URL yields an `error`
    /// result instead of a fetch attempt.
    pub async fn analyze_address(&self, address: &str) -> AnalysisResult {
        match AnalysisTarget::parse(address) {
            Ok(target) => self.analyze(&target).await,
            Err(e) => {
                tracing::warn!("Rejected address '{}': {}", address, e);
                RunningAnalysis::start().fail(&AnalysisError::InvalidUrl(e.to_string()))
            }
        }
    }

    /// Runs the analysis for a stored record and persists the result
    ///
    /// The record must be `queued`; it is moved to `running` before the fetch
    /// and receives the finalized result in a single write.
    pub async fn run(&self, record_id: i64, address: &str) -> Result<AnalysisResult, AnalyzerError> {
        self.store.mark_running(record_id)?;
        let result = self.analyze_address(address).await;
        self.store.save_result(record_id, &result)?;
        Ok(result)
    }

    /// Spawns [`Orchestrator::run`] on the runtime
    pub fn spawn(&self, record_id: i64, address: String) -> AnalysisHandle {
        let orchestrator = self.clone();
        tokio::spawn(async move {
            let outcome = orchestrator.run(record_id, &address).await;
            if let Err(e) = &outcome {
                tracing::error!("Analysis of record {} could not be stored: {}", record_id, e);
            }
            outcome
        })
    }

    /// Creates a queued record for `address` and spawns its analysis
    ///
    /// # Returns
    ///
    /// * `Ok((id, handle))` - The new record ID and its run handle
    /// * `Err(AnalyzerError)` - The address is not a valid URL or the record
    ///   could not be created
    pub fn submit(&self, address: &str) -> Result<(i64, AnalysisHandle), AnalyzerError> {
        let target = AnalysisTarget::parse(address)?;
        let id = self.store.create_record(target.raw())?;
        tracing::debug!("Queued record {} for {}", id, target);
        Ok((id, self.spawn(id, target.raw().to_string())))
    }

    /// Resets finished records to `queued` and spawns a new run for each
    ///
    /// IDs without a record are skipped, and so are records whose run is still
    /// `queued` or `running`: that run keeps ownership of the record and its
    /// result is the one stored.
    pub fn rerun(&self, ids: &[i64]) -> Result<Vec<(i64, AnalysisHandle)>, AnalyzerError> {
        let mut handles = Vec::with_capacity(ids.len());

        for &id in ids {
            let Some(record) = self.store.get_record(id)? else {
                tracing::warn!("Skipping re-analysis of unknown record {}", id);
                continue;
            };

            match self.store.reset_record(id) {
                Ok(true) => handles.push((id, self.spawn(id, record.address))),
                Ok(false) => tracing::warn!("Skipping re-analysis of unknown record {}", id),
                Err(StorageError::InvalidTransition { from, .. }) => {
                    tracing::warn!("Skipping re-analysis of record {}: still {}", id, from)
                }
                Err(e) => return Err(e.into()),
            }
        }

        Ok(handles)
    }
}

fn fail_run(running: RunningAnalysis, target: &AnalysisTarget, error: AnalysisError) -> AnalysisResult {
    if error.is_transport() {
        tracing::warn!("Could not reach {}: {}", target, error);
    } else {
        tracing::warn!("Analysis of {} failed: {}", target, error);
    }
    running.fail(&error)
}

/// Parses the body and runs every document-level analysis
fn inspect_page(page: &FetchedPage, base_url: &Url) -> Result<PageInspection, AnalysisError> {
    let document = ParsedDocument::parse(&page.body)?;

    Ok(PageInspection {
        structure: analyze_structure(&document, &page.content_type),
        links: classify_links(&document, base_url),
        has_login_form: detect_login_form(&document),
    })
}
