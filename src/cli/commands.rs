//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Back up a HubSpot account to local JSON files
#[derive(Parser, Debug)]
#[command(name = "hubspot-backup")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// HubSpot API key (falls back to $HAPIKEY, then a prompt)
    #[arg(long, global = true)]
    pub hapikey: Option<String>,

    /// Configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory that receives the hubspot-backup folder
    #[arg(short, long, global = true)]
    pub output_dir: Option<PathBuf>,

    /// API host (overrides the config file)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Endpoints to back up (comma-separated, empty = all)
    #[arg(long, global = true, value_delimiter = ',')]
    pub endpoints: Vec<String>,

    /// Keep paginating when a record cannot be written
    #[arg(long, global = true)]
    pub best_effort_writes: bool,

    /// Start without asking for confirmation
    #[arg(short, long, global = true)]
    pub yes: bool,

    /// Skip the account check before the backup
    #[arg(long, global = true)]
    pub skip_check: bool,

    /// Never prompt; fail instead
    #[arg(long, global = true)]
    pub non_interactive: bool,

    /// Output format of the run summary
    #[arg(short, long, global = true, default_value = "pretty")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// CLI subcommands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Back up every endpoint (default)
    Backup,

    /// Check the API key against the account endpoint
    Check,

    /// List the endpoints a backup exports
    Endpoints,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one message per line)
    Json,
    /// Human-readable output
    Pretty,
}
