//! Engine types
//!
//! Configuration and reports for the export engine.

use crate::error::Error;
use crate::types::{RunId, WritePolicy};
use serde::Serialize;

/// Configuration for an export run
#[derive(Debug, Clone, Default)]
pub struct ExportConfig {
    /// What to do when a record cannot be written
    pub write_policy: WritePolicy,
}

impl ExportConfig {
    /// Create a new export config
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the write policy
    #[must_use]
    pub fn with_write_policy(mut self, policy: WritePolicy) -> Self {
        self.write_policy = policy;
        self
    }
}

/// How an endpoint's export ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EndpointStatus {
    /// Reached an empty page or the strategy's last page
    Completed,
    /// Stopped on a transport, API, response, or write error
    Failed,
    /// Stopped because the run was cancelled
    Cancelled,
    /// Never started because the run was cancelled earlier
    Skipped,
}

impl std::fmt::Display for EndpointStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
            Self::Skipped => "skipped",
        };
        write!(f, "{s}")
    }
}

/// Outcome of one endpoint
#[derive(Debug, Clone, Serialize)]
pub struct EndpointReport {
    /// Endpoint name
    pub endpoint: String,
    /// Final status
    pub status: EndpointStatus,
    /// Records written to the sink
    pub records_written: u64,
    /// Records the sink failed to write
    pub write_failures: u64,
    /// Requests issued
    pub pages_fetched: u32,
    /// Error that ended the endpoint, if any
    pub error: Option<String>,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl EndpointReport {
    /// Create an empty report for `endpoint`
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            status: EndpointStatus::Completed,
            records_written: 0,
            write_failures: 0,
            pages_fetched: 0,
            error: None,
            duration_ms: 0,
        }
    }

    /// Report for an endpoint that never ran
    pub fn skipped(endpoint: impl Into<String>) -> Self {
        Self {
            status: EndpointStatus::Skipped,
            ..Self::new(endpoint)
        }
    }

    /// Mark the endpoint failed with `error`
    pub fn fail(&mut self, error: &Error) {
        self.status = EndpointStatus::Failed;
        self.error = Some(error.to_string());
    }

    /// Whether every record of the endpoint was exported
    pub fn is_complete(&self) -> bool {
        self.status == EndpointStatus::Completed && self.write_failures == 0
    }
}

/// Outcome of a whole run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Run identifier (`YYYY-MM-DD`)
    #[serde(serialize_with = "serialize_run_id")]
    pub run_id: RunId,
    /// Per-endpoint reports in catalog order
    pub endpoints: Vec<EndpointReport>,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl RunReport {
    /// Create an empty report
    pub fn new(run_id: RunId) -> Self {
        Self {
            run_id,
            endpoints: Vec::new(),
            duration_ms: 0,
        }
    }

    /// Total records written across endpoints
    pub fn records_written(&self) -> u64 {
        self.endpoints.iter().map(|e| e.records_written).sum()
    }

    /// Endpoints that did not export completely
    pub fn incomplete(&self) -> impl Iterator<Item = &EndpointReport> {
        self.endpoints.iter().filter(|e| !e.is_complete())
    }

    /// Whether every endpoint exported completely
    pub fn is_success(&self) -> bool {
        self.incomplete().next().is_none()
    }

    /// Whether the run was cut short by cancellation
    pub fn was_cancelled(&self) -> bool {
        self.endpoints.iter().any(|e| {
            matches!(
                e.status,
                EndpointStatus::Cancelled | EndpointStatus::Skipped
            )
        })
    }

    /// Look up one endpoint's report
    pub fn endpoint(&self, name: &str) -> Option<&EndpointReport> {
        self.endpoints.iter().find(|e| e.endpoint == name)
    }

    /// `Ok` when the run succeeded, otherwise the matching error
    pub fn into_result(self) -> crate::error::Result<Self> {
        if self.is_success() {
            return Ok(self);
        }
        if self.was_cancelled() {
            return Err(Error::Cancelled);
        }
        Err(Error::Incomplete {
            failed: self.incomplete().count(),
            total: self.endpoints.len(),
        })
    }
}

fn serialize_run_id<S: serde::Serializer>(
    run_id: &RunId,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(run_id)
}
