//! Pagination strategy implementations
//!
//! Each strategy handles one of the conventions used by the HubSpot API
//! family.

use super::types::{NextPage, PaginationState, Paginator, QueryParams};
use crate::decode::{CursorField, Envelope};

/// Page size requested from most collections
pub const DEFAULT_PAGE_SIZE: u32 = 250;

/// Page size accepted by the contacts `vidOffset` API
pub const VID_OFFSET_PAGE_SIZE: u32 = 100;

// ============================================================================
// Cursor Pagination
// ============================================================================

/// `has-more` driven pagination (lists, deals, companies, contacts)
///
/// Sends `count=<size>&<cursor>=N` and continues while the response says
/// `has-more: true`, taking the next cursor from the response.
#[derive(Debug, Clone)]
pub struct CursorPaginator {
    /// Response field and query parameter pair
    pub cursor: CursorField,
    /// Value of the `count` parameter
    pub page_size: u32,
}

impl CursorPaginator {
    /// Create a new cursor paginator
    pub fn new(cursor: CursorField, page_size: u32) -> Self {
        Self { cursor, page_size }
    }
}

impl Paginator for CursorPaginator {
    fn params(&self, state: &PaginationState) -> QueryParams {
        vec![
            ("count".to_string(), self.page_size.to_string()),
            (
                self.cursor.query_param().to_string(),
                state.cursor.to_string(),
            ),
        ]
    }

    fn process_response(&self, envelope: &Envelope, state: &mut PaginationState) -> NextPage {
        if !envelope.has_more {
            return NextPage::Done;
        }

        match envelope.cursor(self.cursor) {
            Some(cursor) => {
                state.set_cursor(cursor);
                NextPage::Continue
            }
            None => NextPage::MissingCursor(self.cursor),
        }
    }
}

// ============================================================================
// Single Page
// ============================================================================

/// One request only (blogs, hubdb tables, workflows)
#[derive(Debug, Clone)]
pub struct SinglePagePaginator {
    /// Value of the `count` parameter
    pub page_size: u32,
}

impl SinglePagePaginator {
    /// Create a new single page paginator
    pub fn new(page_size: u32) -> Self {
        Self { page_size }
    }
}

impl Paginator for SinglePagePaginator {
    fn params(&self, state: &PaginationState) -> QueryParams {
        vec![
            ("count".to_string(), self.page_size.to_string()),
            ("offset".to_string(), state.cursor.to_string()),
        ]
    }

    fn process_response(&self, _envelope: &Envelope, _state: &mut PaginationState) -> NextPage {
        NextPage::Done
    }
}

// ============================================================================
// Limit Increment
// ============================================================================

/// `limit`/`offset` pagination (content, blog, and marketing APIs)
///
/// Advances the offset by the number of items actually returned and keeps
/// going until a page comes back empty. A short page does not end the
/// export; the following empty page does.
#[derive(Debug, Clone)]
pub struct LimitIncrementPaginator {
    /// Value of the `limit` parameter
    pub page_size: u32,
}

impl LimitIncrementPaginator {
    /// Create a new limit increment paginator
    pub fn new(page_size: u32) -> Self {
        Self { page_size }
    }
}

impl Paginator for LimitIncrementPaginator {
    fn params(&self, state: &PaginationState) -> QueryParams {
        vec![
            ("limit".to_string(), self.page_size.to_string()),
            ("offset".to_string(), state.cursor.to_string()),
        ]
    }

    fn process_response(&self, envelope: &Envelope, state: &mut PaginationState) -> NextPage {
        if envelope.is_empty() {
            return NextPage::Done;
        }

        state.set_cursor(state.cursor + envelope.len() as u64);
        NextPage::Continue
    }
}
