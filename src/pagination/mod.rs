//! Pagination module
//!
//! Supports: Cursor (`offset` / `vid-offset`), Single Page, Limit Increment
//!
//! # Overview
//!
//! Each strategy only decides the query parameters for the next request and
//! whether to continue. Fetching, parsing, and persisting live in the single
//! driver loop of the engine, which also enforces the rule every strategy
//! shares: an empty page ends the endpoint.

mod strategies;
mod types;

pub use strategies::{
    CursorPaginator, LimitIncrementPaginator, SinglePagePaginator, DEFAULT_PAGE_SIZE,
    VID_OFFSET_PAGE_SIZE,
};
pub use types::{NextPage, PaginationState, PaginationStrategy, Paginator, QueryParams};
