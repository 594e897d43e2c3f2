//! Output module
//!
//! Persists exported records to the local backup tree.
//!
//! # Overview
//!
//! This module provides:
//! - The on-disk layout `hubspot-backup/<YYYY-MM-DD>/<endpoint>/<index>.json`
//! - `RecordSink`, the seam the export engine writes through
//! - `FileSink`, the filesystem implementation

mod layout;
mod sink;

pub use layout::{backup_dir, endpoint_dir, record_path, BACKUP_DIR_NAME};
pub use sink::{FileSink, RecordSink};

#[cfg(test)]
mod tests;
