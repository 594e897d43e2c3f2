// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::needless_pass_by_value)]

//! # hubspot-backup
//!
//! Full-account backup for HubSpot: every collection of the account is paged
//! through to exhaustion and each record is written to its own JSON file.
//!
//! ## Features
//!
//! - **Fixed Catalog**: 16 collections (CRM, content, blog, HubDB, workflows)
//! - **Three Pagination Styles**: `has-more` cursors (`offset` / `vid-offset`),
//!   single page, and limit increment
//! - **Contiguous File Names**: records are numbered `0..N-1` per endpoint
//! - **Error Isolation**: a failing endpoint never stops the ones after it
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use hubspot_backup::{catalog, ExportEngine, FileSink, HttpClient, RunId};
//!
//! #[tokio::main]
//! async fn main() -> hubspot_backup::Result<()> {
//!     let token = hubspot_backup::ApiToken::new("pat-na1-...")?;
//!     let client = HttpClient::with_auth(Default::default(), token)?;
//!     let run_id = RunId::today();
//!
//!     let engine = ExportEngine::new(client, Box::new(FileSink::new(".", run_id)), run_id);
//!     let report = engine.run(&catalog::default_catalog(catalog::DEFAULT_API_BASE)).await;
//!     report.into_result()?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │              ExportEngine::run(catalog) → RunReport          │
//! └─────────────────────────────────────────────────────────────┘
//!                               │ per endpoint
//! ┌───────────┬─────────────────┼───────────────┬───────────────┐
//! │   HTTP    │     Decode      │   Paginate    │    Output     │
//! ├───────────┼─────────────────┼───────────────┼───────────────┤
//! │ Bearer    │ objects / name  │ has-more      │ <date>/       │
//! │ GET       │ has-more        │ single page   │  <endpoint>/  │
//! │ Raw body  │ offset cursors  │ limit + len   │   <i>.json    │
//! └───────────┴─────────────────┴───────────────┴───────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the crate
pub mod error;

/// Common types and type aliases
pub mod types;

/// Bearer token and its resolution
pub mod auth;

/// HTTP client for the remote fetch step
pub mod http;

/// Collection response parsing
pub mod decode;

/// Pagination strategies
pub mod pagination;

/// Record persistence
pub mod output;

/// Main export engine
pub mod engine;

/// Built-in endpoint catalog
pub mod catalog;

/// Account check
pub mod account;

/// Run configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use auth::ApiToken;
pub use catalog::EndpointDescriptor;
pub use config::BackupConfig;
pub use engine::{EndpointReport, EndpointStatus, ExportConfig, ExportEngine, RunReport};
pub use http::HttpClient;
pub use output::{FileSink, RecordSink};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
