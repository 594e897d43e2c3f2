//! Error types for hubspot-backup
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for hubspot-backup
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("No HubSpot API key present (use --hapikey or HAPIKEY)")]
    MissingToken,

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Remote API Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("HubSpot API error {status}: {message}")]
    RemoteApi { status: u16, message: String },

    #[error("Malformed response from '{endpoint}': {message}")]
    MalformedResponse { endpoint: String, message: String },

    #[error("Account check failed: {message}")]
    AccountCheck { message: String },

    // ============================================================================
    // Persistence Errors
    // ============================================================================
    #[error("Failed to persist '{path}': {message}")]
    Persistence { path: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Run Control
    // ============================================================================
    #[error("Backup cancelled")]
    Cancelled,

    #[error("Backup aborted by user")]
    Aborted,

    #[error("{failed} of {total} endpoints did not complete")]
    Incomplete { failed: usize, total: usize },

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a remote API error
    pub fn remote_api(status: u16, message: impl Into<String>) -> Self {
        Self::RemoteApi {
            status,
            message: message.into(),
        }
    }

    /// Create a malformed response error
    pub fn malformed(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    /// Create a persistence error
    pub fn persistence(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Persistence {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an account check error
    pub fn account_check(message: impl Into<String>) -> Self {
        Self::AccountCheck {
            message: message.into(),
        }
    }

    /// Whether this error came from the network layer rather than the API
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Http(_) | Error::Timeout { .. })
    }
}

/// Result type alias for hubspot-backup
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::remote_api(401, "Authentication credentials not found");
        assert_eq!(
            err.to_string(),
            "HubSpot API error 401: Authentication credentials not found"
        );

        let err = Error::malformed("deals", "expected value at line 1 column 1");
        assert_eq!(
            err.to_string(),
            "Malformed response from 'deals': expected value at line 1 column 1"
        );

        let err = Error::Incomplete {
            failed: 2,
            total: 16,
        };
        assert_eq!(err.to_string(), "2 of 16 endpoints did not complete");
    }

    #[test]
    fn test_is_transport() {
        assert!(Error::Timeout { timeout_ms: 1000 }.is_transport());
        assert!(!Error::remote_api(500, "").is_transport());
        assert!(!Error::persistence("a/0.json", "denied").is_transport());
        assert!(!Error::Cancelled.is_transport());
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::config("inner"));
        let with_context = result.context("outer");
        assert!(with_context
            .unwrap_err()
            .to_string()
            .contains("outer: Configuration error: inner"));
    }
}
