//! Run configuration
//!
//! Settings for a backup run, loaded from an optional YAML file and then
//! overridden by command line flags. The API key is never read from here.

use crate::catalog::DEFAULT_API_BASE;
use crate::error::{Error, Result, ResultExt};
use crate::types::WritePolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Backup run configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BackupConfig {
    /// API host every catalog path is joined to
    pub base_url: String,

    /// Directory that receives the `hubspot-backup` folder
    pub output_dir: PathBuf,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// What to do when a record cannot be written
    pub write_policy: WritePolicy,

    /// Endpoints to export (empty = all)
    pub endpoints: Vec<String>,
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            output_dir: PathBuf::from("."),
            timeout_secs: default_timeout(),
            write_policy: WritePolicy::default(),
            endpoints: Vec::new(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

impl BackupConfig {
    /// Parse configuration from YAML text
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Load from `path` when given, otherwise use defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Per-request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check the settings before a run
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::config(format!(
                "base_url must be http or https, got '{}'",
                url.scheme()
            )));
        }

        if self.timeout_secs == 0 {
            return Err(Error::config("timeout_secs must be greater than zero"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = BackupConfig::default();
        assert_eq!(config.base_url, "https://api.hubapi.com");
        assert_eq!(config.output_dir, PathBuf::from("."));
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.write_policy, WritePolicy::Abort);
        assert!(config.endpoints.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_yaml() {
        let config = BackupConfig::from_yaml(
            r"
output_dir: /var/backups
write_policy: continue
endpoints:
  - contacts
  - deals
",
        )
        .unwrap();

        assert_eq!(config.output_dir, PathBuf::from("/var/backups"));
        assert_eq!(config.write_policy, WritePolicy::Continue);
        assert_eq!(config.endpoints, vec!["contacts", "deals"]);
        assert_eq!(config.base_url, DEFAULT_API_BASE);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_token_is_not_a_config_field() {
        let err = BackupConfig::from_yaml("hapikey: secret\n").unwrap_err();
        assert!(matches!(err, Error::YamlParse(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "base_url: http://localhost:8080\ntimeout_secs: 5").unwrap();

        let config = BackupConfig::from_file(file.path()).unwrap();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_from_missing_file() {
        let err = BackupConfig::from_file("/nonexistent/backup.yaml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_load_without_path() {
        assert_eq!(BackupConfig::load(None).unwrap(), BackupConfig::default());
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let config = BackupConfig {
            base_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidUrl(_))));

        let config = BackupConfig {
            base_url: "ftp://api.hubapi.com".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = BackupConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
