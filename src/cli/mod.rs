//! CLI module
//!
//! Command-line interface for backing up an account.
//!
//! # Commands
//!
//! - `backup` - Export every endpoint to local JSON files (default)
//! - `check` - Verify the API key against the account endpoint
//! - `endpoints` - List the endpoints a backup exports

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
