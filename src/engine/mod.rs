//! Execution engine module
//!
//! Main export loop and endpoint orchestration.
//!
//! # Overview
//!
//! The engine module provides:
//! - `ExportEngine` - Walks every endpoint of the catalog to exhaustion
//! - `ExportConfig` - Configuration for a run
//! - `EndpointReport` / `RunReport` - What happened, per endpoint and overall
//!
//! Endpoints run one after another and pages are fetched one at a time.
//! Every strategy goes through the same loop: fetch, parse, stop on an empty
//! page, persist at contiguous global indices, then ask the strategy whether
//! to continue.

mod types;

pub use types::{EndpointReport, EndpointStatus, ExportConfig, RunReport};

use crate::catalog::EndpointDescriptor;
use crate::decode::EnvelopeParser;
use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestConfig};
use crate::output::RecordSink;
use crate::pagination::{NextPage, PaginationState};
use crate::types::{JsonValue, RunId, WritePolicy};
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Why the page loop stopped
enum PageLoopEnd {
    Finished,
    Cancelled,
}

/// Export engine for one run
pub struct ExportEngine {
    /// HTTP client carrying the bearer token
    client: HttpClient,
    /// Where records are written
    sink: Box<dyn RecordSink>,
    /// Run identifier shared by all endpoints
    run_id: RunId,
    /// Export configuration
    config: ExportConfig,
    /// Checked between pages and between endpoints
    cancel: CancellationToken,
}

impl ExportEngine {
    /// Create a new export engine
    pub fn new(client: HttpClient, sink: Box<dyn RecordSink>, run_id: RunId) -> Self {
        Self {
            client,
            sink,
            run_id,
            config: ExportConfig::default(),
            cancel: CancellationToken::new(),
        }
    }

    /// Set export configuration
    #[must_use]
    pub fn with_config(mut self, config: ExportConfig) -> Self {
        self.config = config;
        self
    }

    /// Use an externally controlled cancellation token
    #[must_use]
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Run identifier for this engine
    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    /// Export every endpoint in order
    ///
    /// A failing endpoint never stops the ones after it; only cancellation
    /// does.
    pub async fn run(&self, catalog: &[EndpointDescriptor]) -> RunReport {
        let start = Instant::now();
        let mut report = RunReport::new(self.run_id);

        for endpoint in catalog {
            if self.cancel.is_cancelled() {
                report.endpoints.push(EndpointReport::skipped(&endpoint.name));
                continue;
            }

            report.endpoints.push(self.export_endpoint(endpoint).await);
        }

        report.duration_ms = start.elapsed().as_millis() as u64;
        report
    }

    /// Export one endpoint to exhaustion
    pub async fn export_endpoint(&self, endpoint: &EndpointDescriptor) -> EndpointReport {
        let start = Instant::now();
        let mut report = EndpointReport::new(&endpoint.name);

        info!("Backing up {} ({})", endpoint.name, endpoint.strategy);

        match self.page_loop(endpoint, &mut report).await {
            Ok(PageLoopEnd::Finished) => {
                if report.write_failures > 0 {
                    warn!(
                        "Backed up {} with {} unwritten records",
                        endpoint.name, report.write_failures
                    );
                } else {
                    info!(
                        "Backed up all {} ({} records)",
                        endpoint.name, report.records_written
                    );
                }
            }
            Ok(PageLoopEnd::Cancelled) => {
                report.status = EndpointStatus::Cancelled;
                report.error = Some(Error::Cancelled.to_string());
                warn!(
                    "Backup of {} cancelled after {} records",
                    endpoint.name, report.records_written
                );
            }
            Err(e) => {
                error!("Backup of {} failed: {e}", endpoint.name);
                report.fail(&e);
            }
        }

        report.duration_ms = start.elapsed().as_millis() as u64;
        report
    }

    async fn page_loop(
        &self,
        endpoint: &EndpointDescriptor,
        report: &mut EndpointReport,
    ) -> Result<PageLoopEnd> {
        let paginator = endpoint.strategy.paginator();
        let parser = EnvelopeParser::new(&endpoint.name).with_location(endpoint.location.clone());
        let mut state = PaginationState::new();

        loop {
            if self.cancel.is_cancelled() {
                return Ok(PageLoopEnd::Cancelled);
            }

            let mut request = RequestConfig::new();
            for (key, value) in paginator.params(&state) {
                request = request.query(key, value);
            }

            let response = tokio::select! {
                () = self.cancel.cancelled() => return Ok(PageLoopEnd::Cancelled),
                response = self.client.get(&endpoint.url, request) => response?,
            };

            state.next_page();
            report.pages_fetched = state.pages;

            let body = response.into_body()?;
            let envelope = parser.parse(&body)?;

            if envelope.is_empty() {
                debug!("{}: empty page at cursor {}", endpoint.name, state.cursor);
                return Ok(PageLoopEnd::Finished);
            }

            let base = state.allocate(envelope.len());
            info!(
                "Backing up {}: {}",
                endpoint.name,
                base + envelope.len() as u64
            );

            for (offset, item) in envelope.items.iter().enumerate() {
                self.persist(&endpoint.name, base + offset as u64, item, report)
                    .await?;
            }

            match paginator.process_response(&envelope, &mut state) {
                NextPage::Continue => {}
                NextPage::Done => return Ok(PageLoopEnd::Finished),
                NextPage::MissingCursor(field) => {
                    return Err(Error::malformed(
                        &endpoint.name,
                        format!(
                            "has-more is true but '{}' is missing or not a number",
                            field.response_key()
                        ),
                    ));
                }
            }
        }
    }

    async fn persist(
        &self,
        endpoint: &str,
        index: u64,
        item: &JsonValue,
        report: &mut EndpointReport,
    ) -> Result<()> {
        match self.sink.persist(endpoint, index, item).await {
            Ok(_) => {
                report.records_written += 1;
                Ok(())
            }
            Err(e) => match self.config.write_policy {
                WritePolicy::Abort => Err(e),
                WritePolicy::Continue => {
                    warn!("Skipping {endpoint} record {index}: {e}");
                    report.write_failures += 1;
                    Ok(())
                }
            },
        }
    }
}

impl std::fmt::Debug for ExportEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportEngine")
            .field("client", &self.client)
            .field("run_id", &self.run_id)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
