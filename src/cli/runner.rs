//! CLI runner - executes commands

use crate::account::{fetch_account_info, AccountInfo};
use crate::auth::{ApiToken, TokenResolver};
use crate::catalog::{self, EndpointDescriptor};
use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::BackupConfig;
use crate::engine::{ExportConfig, ExportEngine, RunReport};
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig};
use crate::output::FileSink;
use crate::types::{RunId, WritePolicy};
use serde_json::{json, Value};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// File whose presence means we run inside a container
const CONTAINER_MARKER: &str = "/.dockerenv";

/// Answer at the confirmation prompt that re-enters the API key
const CHANGE_KEY_ANSWER: &str = "change";

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match self.cli.command.unwrap_or(Commands::Backup) {
            Commands::Backup => self.backup().await,
            Commands::Check => self.check().await,
            Commands::Endpoints => self.endpoints(),
        }
    }

    /// Load the config file, then apply command line overrides
    pub fn load_config(&self) -> Result<BackupConfig> {
        let mut config = BackupConfig::load(self.cli.config.as_deref())?;

        if let Some(base_url) = &self.cli.base_url {
            config.base_url.clone_from(base_url);
        }
        if let Some(output_dir) = &self.cli.output_dir {
            config.output_dir.clone_from(output_dir);
        }
        if let Some(timeout) = self.cli.timeout {
            config.timeout_secs = timeout;
        }
        if !self.cli.endpoints.is_empty() {
            config.endpoints.clone_from(&self.cli.endpoints);
        }
        if self.cli.best_effort_writes {
            config.write_policy = WritePolicy::Continue;
        }

        config.validate()?;
        Ok(config)
    }

    /// Whether prompts may be shown
    fn interactive(&self) -> bool {
        !self.cli.non_interactive && !in_container()
    }

    fn resolve_token(&self) -> Result<ApiToken> {
        let (token, source) = TokenResolver::from_env(self.cli.hapikey.clone())
            .interactive(self.interactive())
            .resolve(|| read_line("Enter your HubSpot API key: "))?;
        debug!("Using API key from {source:?}");
        Ok(token)
    }

    fn build_client(config: &BackupConfig, token: ApiToken) -> Result<HttpClient> {
        let http_config = HttpClientConfig::builder()
            .timeout(config.timeout())
            .build();
        HttpClient::with_auth(http_config, token)
    }

    /// Check the API key against the account endpoint
    async fn check(&self) -> Result<()> {
        let config = self.load_config()?;
        let client = Self::build_client(&config, self.resolve_token()?)?;

        match fetch_account_info(&client, &config.base_url).await {
            Ok(account) => {
                self.report_account(&account);
                Ok(())
            }
            Err(e) => {
                if self.cli.format == OutputFormat::Json {
                    self.output_message(&json!({
                        "type": "CONNECTION_STATUS",
                        "connectionStatus": {
                            "status": "FAILED",
                            "message": e.to_string()
                        }
                    }));
                }
                Err(e)
            }
        }
    }

    fn report_account(&self, account: &AccountInfo) {
        info!("Connected to HubSpot account {}", account.portal_id);
        match self.cli.format {
            OutputFormat::Json => self.output_message(&json!({
                "type": "CONNECTION_STATUS",
                "connectionStatus": {
                    "status": "SUCCEEDED",
                    "account": account
                }
            })),
            OutputFormat::Pretty => println!("{account}"),
        }
    }

    /// List the endpoints a backup exports
    fn endpoints(&self) -> Result<()> {
        let config = self.load_config()?;
        let catalog = catalog::select(catalog::default_catalog(&config.base_url), &config.endpoints)?;

        for endpoint in &catalog {
            match self.cli.format {
                OutputFormat::Json => self.output_message(&json!({
                    "type": "ENDPOINT",
                    "endpoint": endpoint
                })),
                OutputFormat::Pretty => {
                    println!("{:<18} {:<22} {}", endpoint.name, endpoint.strategy, endpoint.url);
                }
            }
        }

        Ok(())
    }

    /// Back up every selected endpoint
    async fn backup(&self) -> Result<()> {
        let config = self.load_config()?;
        let catalog = catalog::select(catalog::default_catalog(&config.base_url), &config.endpoints)?;
        let mut client = Self::build_client(&config, self.resolve_token()?)?;

        if !self.cli.skip_check {
            self.report_account(&fetch_account_info(&client, &config.base_url).await?);
        }

        if !self.cli.yes && self.interactive() {
            self.confirm(&config, &mut client).await?;
        }

        let run_id = RunId::today();
        let sink = FileSink::new(&config.output_dir, run_id);
        let backup_dir = sink.backup_dir();

        let cancel = CancellationToken::new();
        let interrupt = spawn_interrupt_handler(cancel.clone());

        let engine = ExportEngine::new(client, Box::new(sink), run_id)
            .with_config(ExportConfig::new().with_write_policy(config.write_policy))
            .with_cancellation(cancel);

        let report = self.run_engine(&engine, &catalog).await;
        interrupt.abort();

        self.report_run(&report);
        self.report_saved(&report, &backup_dir);

        // A container's terminal closes with the process
        if in_container() && !self.cli.non_interactive {
            read_line("Press ENTER to close.")?;
        }

        report.into_result().map(|_| ())
    }

    async fn run_engine(&self, engine: &ExportEngine, catalog: &[EndpointDescriptor]) -> RunReport {
        info!(
            "Starting backup {} of {} endpoints",
            engine.run_id(),
            catalog.len()
        );
        engine.run(catalog).await
    }

    /// Ask before starting; `change` re-enters the key
    async fn confirm(&self, config: &BackupConfig, client: &mut HttpClient) -> Result<()> {
        loop {
            let answer = read_line(&format!(
                "Press ENTER to start backup (or type '{CHANGE_KEY_ANSWER}' to use another API key): "
            ))?;

            match answer.trim() {
                "" => return Ok(()),
                CHANGE_KEY_ANSWER => {
                    let token = ApiToken::new(read_line("Enter your HubSpot API key: ")?)?;
                    client.set_token(token);
                    if !self.cli.skip_check {
                        self.report_account(&fetch_account_info(client, &config.base_url).await?);
                    }
                }
                _ => return Err(Error::Aborted),
            }
        }
    }

    fn report_run(&self, report: &RunReport) {
        match self.cli.format {
            OutputFormat::Json => self.output_message(&json!({
                "type": "REPORT",
                "report": report
            })),
            OutputFormat::Pretty => {
                for endpoint in &report.endpoints {
                    print!(
                        "{:<18} {:<10} {:>7} records",
                        endpoint.endpoint, endpoint.status, endpoint.records_written
                    );
                    if endpoint.write_failures > 0 {
                        print!(" ({} not written)", endpoint.write_failures);
                    }
                    match &endpoint.error {
                        Some(error) => println!("  {error}"),
                        None => println!(),
                    }
                }
                println!(
                    "{} records from {} endpoints in {:.1}s",
                    report.records_written(),
                    report.endpoints.len(),
                    report.duration_ms as f64 / 1000.0
                );
            }
        }
    }

    fn report_saved(&self, report: &RunReport, backup_dir: &Path) {
        let saved = format!("Backup saved in {}", display_path(backup_dir).display());
        match self.cli.format {
            OutputFormat::Json => self.output_message(&json!({
                "type": "LOG",
                "log": {
                    "level": if report.is_success() { "INFO" } else { "WARN" },
                    "message": format!("{saved}. {}", closing_banner(report))
                }
            })),
            OutputFormat::Pretty => {
                println!("{saved}");
                println!();
                println!("===== {} =====", closing_banner(report));
            }
        }
    }

    fn output_message(&self, msg: &Value) {
        println!("{}", serde_json::to_string(msg).unwrap_or_default());
    }
}

/// Cancel `cancel` on Ctrl-C
fn spawn_interrupt_handler(cancel: CancellationToken) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, stopping after the current page");
            cancel.cancel();
        }
    })
}

/// Whether we run inside a container
fn in_container() -> bool {
    Path::new(CONTAINER_MARKER).exists()
}

/// Closing line of a backup run
fn closing_banner(report: &RunReport) -> &'static str {
    if report.is_success() {
        "HUBSPOT BACKUP COMPLETE"
    } else if report.was_cancelled() {
        "HUBSPOT BACKUP CANCELLED"
    } else {
        "HUBSPOT BACKUP INCOMPLETE"
    }
}

/// Print `prompt` and read one line from stdin
fn read_line(prompt: &str) -> Result<String> {
    print!("{prompt}");
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Absolute form of `path` when it can be resolved
fn display_path(path: &Path) -> PathBuf {
    std::fs::canonicalize(path)
        .or_else(|_| std::env::current_dir().map(|cwd| cwd.join(path)))
        .unwrap_or_else(|_| path.to_path_buf())
}
