//! HTTP client for the HubSpot API
//!
//! Provides a thin client that handles:
//! - Bearer authentication and the JSON content type
//! - Error envelope decoding for non-2xx responses
//! - Timeout classification for transport errors

use crate::auth::ApiToken;
use crate::error::{Error, Result};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: format!("hubspot-backup/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// Configuration for a single request
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    /// Query parameters, sent in insertion order
    pub query: Vec<(String, String)>,
}

impl RequestConfig {
    /// Create a new request config
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }
}

/// HubSpot error envelope
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    /// Human-readable error message
    #[serde(default)]
    pub message: String,
}

/// Status and body of one response
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// Raw response body
    pub body: String,
}

impl RawResponse {
    /// Whether the status is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }

    /// Best available error message for a failed response
    ///
    /// Uses the `message` field of the error envelope, then the raw body,
    /// then the canonical reason phrase.
    pub fn error_message(&self) -> String {
        if let Ok(envelope) = serde_json::from_str::<ApiErrorBody>(&self.body) {
            if !envelope.message.is_empty() {
                return envelope.message;
            }
        }

        let body = self.body.trim();
        if !body.is_empty() {
            return body.to_string();
        }

        StatusCode::from_u16(self.status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("Unknown status")
            .to_string()
    }

    /// Return the body of a 2xx response, or a `RemoteApi` error otherwise
    pub fn into_body(self) -> Result<String> {
        if self.is_success() {
            Ok(self.body)
        } else {
            Err(Error::remote_api(self.status, self.error_message()))
        }
    }
}

/// HTTP client carrying the account's bearer token
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
    token: Option<ApiToken>,
}

impl HttpClient {
    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            client,
            config,
            token: None,
        })
    }

    /// Create a client that authenticates every request with `token`
    pub fn with_auth(config: HttpClientConfig, token: ApiToken) -> Result<Self> {
        let mut client = Self::with_config(config)?;
        client.token = Some(token);
        Ok(client)
    }

    /// Set the bearer token
    pub fn set_token(&mut self, token: ApiToken) {
        self.token = Some(token);
    }

    /// Issue one GET against an absolute URL and return its status and body
    ///
    /// Non-2xx statuses are not errors at this level; only transport
    /// failures are.
    pub async fn get(&self, url: &str, config: RequestConfig) -> Result<RawResponse> {
        let mut req = self.client.get(url);

        if !config.query.is_empty() {
            req = req.query(&config.query);
        }

        if let Some(ref token) = self.token {
            req = token.apply(req);
        }

        let response = req.send().await.map_err(|e| {
            if e.is_timeout() {
                Error::Timeout {
                    timeout_ms: self.config.timeout.as_millis() as u64,
                }
            } else {
                Error::Http(e)
            }
        })?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        debug!("GET {} -> {}", url, status);
        Ok(RawResponse { status, body })
    }

    /// Make a GET request and parse a JSON response, failing on non-2xx
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let body = self.get(url, RequestConfig::default()).await?.into_body()?;
        Ok(serde_json::from_str(&body)?)
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .field("has_token", &self.token.is_some())
            .finish_non_exhaustive()
    }
}
