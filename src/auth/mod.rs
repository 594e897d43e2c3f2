//! Authentication module
//!
//! Carries the HubSpot bearer token and resolves it from the command line,
//! the `HAPIKEY` environment variable, or an interactive prompt.
//!
//! Only the token itself is managed here; obtaining one (private app
//! settings) happens outside this tool.

mod token;

pub use token::{ApiToken, TokenResolver, TokenSource, HAPIKEY_ENV};

#[cfg(test)]
mod tests;
