//! Backup directory layout
//!
//! Format: `{root}/hubspot-backup/{YYYY-MM-DD}/{endpoint}/{index}.json`

use crate::types::RunId;
use std::path::{Path, PathBuf};

/// Name of the top-level backup directory
pub const BACKUP_DIR_NAME: &str = "hubspot-backup";

/// Directory holding every endpoint of one run
pub fn backup_dir(root: &Path, run_id: RunId) -> PathBuf {
    root.join(BACKUP_DIR_NAME).join(run_id.to_string())
}

/// Directory holding one endpoint's records
pub fn endpoint_dir(root: &Path, run_id: RunId, endpoint: &str) -> PathBuf {
    backup_dir(root, run_id).join(endpoint)
}

/// File for one record
pub fn record_path(root: &Path, run_id: RunId, endpoint: &str, index: u64) -> PathBuf {
    endpoint_dir(root, run_id, endpoint).join(format!("{index}.json"))
}
