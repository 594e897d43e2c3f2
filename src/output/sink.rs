//! Record sinks
//!
//! A sink receives each exported item exactly once, keyed by endpoint and
//! global item index.

use super::layout::{backup_dir, endpoint_dir, record_path};
use crate::error::{Error, Result};
use crate::types::{JsonValue, RunId};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::trace;

/// Destination for exported records
#[async_trait]
pub trait RecordSink: Send + Sync {
    /// Persist one item, returning where it was written
    async fn persist(&self, endpoint: &str, index: u64, item: &JsonValue) -> Result<PathBuf>;
}

/// Writes each record as a JSON file under the run's backup directory
#[derive(Debug, Clone)]
pub struct FileSink {
    /// Directory containing `hubspot-backup/`
    root: PathBuf,
    /// Run the records belong to
    run_id: RunId,
}

impl FileSink {
    /// Create a sink rooted at `root`
    pub fn new(root: impl AsRef<Path>, run_id: RunId) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            run_id,
        }
    }

    /// Run identifier this sink writes under
    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    /// `<root>/hubspot-backup/<run>`
    pub fn backup_dir(&self) -> PathBuf {
        backup_dir(&self.root, self.run_id)
    }

    /// `<root>/hubspot-backup/<run>/<endpoint>`
    pub fn endpoint_dir(&self, endpoint: &str) -> PathBuf {
        endpoint_dir(&self.root, self.run_id, endpoint)
    }

    async fn ensure_dir(dir: &Path) -> Result<()> {
        let mut builder = tokio::fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        builder.mode(0o700);

        builder
            .create(dir)
            .await
            .map_err(|e| Error::persistence(dir.display().to_string(), e.to_string()))
    }
}

#[async_trait]
impl RecordSink for FileSink {
    async fn persist(&self, endpoint: &str, index: u64, item: &JsonValue) -> Result<PathBuf> {
        let dir = self.endpoint_dir(endpoint);
        Self::ensure_dir(&dir).await?;

        let path = record_path(&self.root, self.run_id, endpoint, index);
        let bytes = serde_json::to_vec(item)
            .map_err(|e| Error::persistence(path.display().to_string(), e.to_string()))?;

        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| Error::persistence(path.display().to_string(), e.to_string()))?;

        trace!("Wrote {}", path.display());
        Ok(path)
    }
}
