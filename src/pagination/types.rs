//! Pagination types and traits
//!
//! Defines the core pagination abstractions used by all strategies.

use super::strategies::{
    CursorPaginator, LimitIncrementPaginator, SinglePagePaginator, DEFAULT_PAGE_SIZE,
    VID_OFFSET_PAGE_SIZE,
};
use crate::decode::{CursorField, Envelope};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered query parameters for one request
pub type QueryParams = Vec<(String, String)>;

/// Result of the next page computation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextPage {
    /// Fetch again with the updated state
    Continue,
    /// No more pages
    Done,
    /// `has-more` was set but the cursor field was absent or not numeric
    MissingCursor(CursorField),
}

/// Pagination strategy tag carried by each endpoint descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaginationStrategy {
    /// `has-more` plus a cursor field from the response
    Cursor(CursorField),
    /// One request, whatever the response says
    SinglePage,
    /// `limit`/`offset`, advancing by the number of items returned
    LimitIncrement,
}

impl PaginationStrategy {
    /// Build the paginator for this strategy
    pub fn paginator(self) -> Box<dyn Paginator> {
        match self {
            Self::Cursor(CursorField::Offset) => {
                Box::new(CursorPaginator::new(CursorField::Offset, DEFAULT_PAGE_SIZE))
            }
            Self::Cursor(CursorField::VidOffset) => Box::new(CursorPaginator::new(
                CursorField::VidOffset,
                VID_OFFSET_PAGE_SIZE,
            )),
            Self::SinglePage => Box::new(SinglePagePaginator::new(DEFAULT_PAGE_SIZE)),
            Self::LimitIncrement => Box::new(LimitIncrementPaginator::new(DEFAULT_PAGE_SIZE)),
        }
    }
}

impl fmt::Display for PaginationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cursor(field) => write!(f, "cursor ({})", field.response_key()),
            Self::SinglePage => write!(f, "single page"),
            Self::LimitIncrement => write!(f, "limit increment"),
        }
    }
}

/// Tracks pagination state during one endpoint's export
#[derive(Debug, Clone, Default)]
pub struct PaginationState {
    /// Cursor sent with the next request
    pub cursor: u64,
    /// Global item index of the first item on the next page
    pub next_index: u64,
    /// Pages fetched so far
    pub pages: u32,
}

impl PaginationState {
    /// Create a new pagination state
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that a page was fetched
    pub fn next_page(&mut self) {
        self.pages += 1;
    }

    /// Set cursor
    pub fn set_cursor(&mut self, cursor: u64) {
        self.cursor = cursor;
    }

    /// Reserve `count` global indices, returning the first one
    pub fn allocate(&mut self, count: usize) -> u64 {
        let base = self.next_index;
        self.next_index += count as u64;
        base
    }
}

/// Core trait for pagination strategies
///
/// The driver guarantees `process_response` is only called for non-empty
/// pages, after every item on the page has been allocated an index.
pub trait Paginator: Send + Sync {
    /// Query parameters for the request described by `state`
    fn params(&self, state: &PaginationState) -> QueryParams;

    /// Decide whether another page follows and update the cursor
    fn process_response(&self, envelope: &Envelope, state: &mut PaginationState) -> NextPage;
}
