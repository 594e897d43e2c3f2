//! Bearer token handling
//!
//! The token is trimmed once on construction and redacted in `Debug`
//! output so it never reaches the logs.

use crate::error::{Error, Result};
use crate::types::OptionStringExt;
use reqwest::RequestBuilder;
use std::fmt;

/// Environment variable consulted for the API key
pub const HAPIKEY_ENV: &str = "HAPIKEY";

/// A non-empty, trimmed HubSpot bearer token
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    /// Create a token, trimming surrounding whitespace
    pub fn new(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(Error::MissingToken);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The token value
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Apply bearer authentication and the JSON content type to a request
    pub fn apply(&self, req: RequestBuilder) -> RequestBuilder {
        req.header(reqwest::header::CONTENT_TYPE, "application/json")
            .bearer_auth(&self.0)
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiToken").field(&"<redacted>").finish()
    }
}

/// Where a token came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    /// `--hapikey` command line flag
    Flag,
    /// `HAPIKEY` environment variable
    Environment,
    /// Typed in at the prompt
    Prompt,
}

/// Resolves the token in priority order: flag, environment, prompt
#[derive(Debug, Clone, Default)]
pub struct TokenResolver {
    flag: Option<String>,
    env: Option<String>,
    interactive: bool,
}

impl TokenResolver {
    /// Create a resolver from the flag and environment values
    pub fn new(flag: Option<String>, env: Option<String>) -> Self {
        Self {
            flag,
            env,
            interactive: true,
        }
    }

    /// Create a resolver reading `HAPIKEY` from the process environment
    pub fn from_env(flag: Option<String>) -> Self {
        Self::new(flag, std::env::var(HAPIKEY_ENV).ok())
    }

    /// Allow or forbid falling back to the prompt
    #[must_use]
    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    /// Resolve the token, calling `prompt` only when nothing else is set
    pub fn resolve<F>(self, prompt: F) -> Result<(ApiToken, TokenSource)>
    where
        F: FnOnce() -> Result<String>,
    {
        if let Some(flag) = self.flag.none_if_blank() {
            return Ok((ApiToken::new(flag)?, TokenSource::Flag));
        }

        if let Some(env) = self.env.none_if_blank() {
            return Ok((ApiToken::new(env)?, TokenSource::Environment));
        }

        if !self.interactive {
            return Err(Error::MissingToken);
        }

        let answer = prompt()?;
        Ok((ApiToken::new(answer)?, TokenSource::Prompt))
    }
}
