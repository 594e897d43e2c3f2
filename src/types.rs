//! Common types used throughout hubspot-backup
//!
//! This module contains shared type definitions, type aliases,
//! and small utility types used across multiple modules.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// Run Identifier
// ============================================================================

/// Date-based identifier shared by every endpoint of one run
///
/// Computed once at startup and passed down explicitly, so a run that
/// crosses midnight still lands in a single directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunId(NaiveDate);

impl RunId {
    /// Run identifier for today's local date
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    /// Run identifier for a fixed date
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date)
    }

    /// The underlying date
    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

// ============================================================================
// Write Policy
// ============================================================================

/// What to do when a record cannot be written to disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WritePolicy {
    /// Stop the endpoint on the first failed write
    #[default]
    Abort,
    /// Log the failure and keep paginating
    Continue,
}

// ============================================================================
// Utilities
// ============================================================================

/// Extension trait for Option<String> to handle blank strings
pub trait OptionStringExt {
    /// Returns None if the string is empty or whitespace only
    fn none_if_blank(self) -> Option<String>;
}

impl OptionStringExt for Option<String> {
    fn none_if_blank(self) -> Option<String> {
        self.filter(|s| !s.trim().is_empty())
    }
}

impl OptionStringExt for String {
    fn none_if_blank(self) -> Option<String> {
        if self.trim().is_empty() {
            None
        } else {
            Some(self)
        }
    }
}
