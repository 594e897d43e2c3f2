//! Built-in endpoint catalog
//!
//! The fixed list of HubSpot collections exported by every run, in the order
//! they are exported.

use crate::decode::{CursorField, ItemLocation};
use crate::error::{Error, Result};
use crate::pagination::PaginationStrategy;
use serde::Serialize;

/// Default HubSpot API host
pub const DEFAULT_API_BASE: &str = "https://api.hubapi.com";

/// One exported collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndpointDescriptor {
    /// Endpoint name: output folder and fallback item-list key
    pub name: String,
    /// Collection URL without query string
    pub url: String,
    /// How the collection paginates
    pub strategy: PaginationStrategy,
    /// Where the items live in each response
    pub location: ItemLocation,
}

impl EndpointDescriptor {
    /// Create a descriptor using the default item probing
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        strategy: PaginationStrategy,
    ) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            strategy,
            location: ItemLocation::Probe,
        }
    }

    /// Set the item location
    #[must_use]
    pub fn with_location(mut self, location: ItemLocation) -> Self {
        self.location = location;
        self
    }
}

const HAS_MORE: PaginationStrategy = PaginationStrategy::Cursor(CursorField::Offset);
const VID_OFFSET: PaginationStrategy = PaginationStrategy::Cursor(CursorField::VidOffset);
const ONCE: PaginationStrategy = PaginationStrategy::SinglePage;
const LIMIT: PaginationStrategy = PaginationStrategy::LimitIncrement;

/// (endpoint name, path, strategy)
const ENDPOINTS: [(&str, &str, PaginationStrategy); 16] = [
    ("lists", "/contacts/v1/lists", HAS_MORE),
    ("blogs", "/content/api/v2/blogs", ONCE),
    ("blog-posts", "/content/api/v2/blog-posts", LIMIT),
    ("blog-authors", "/blogs/v3/blog-authors", LIMIT),
    ("blog-topics", "/blogs/v3/topics", LIMIT),
    ("blog-comments", "/comments/v3/comments", LIMIT),
    ("layouts", "/content/api/v2/layouts", LIMIT),
    ("pages", "/content/api/v2/pages", LIMIT),
    ("hubdb-tables", "/hubdb/api/v2/tables", ONCE),
    ("templates", "/content/api/v2/templates", LIMIT),
    ("url-mappings", "/url-mappings/v3/url-mappings", LIMIT),
    ("deals", "/deals/v1/deal/paged", HAS_MORE),
    ("marketing-emails", "/marketing-emails/v1/emails", LIMIT),
    ("workflows", "/automation/v3/workflows", ONCE),
    ("companies", "/companies/v2/companies/paged", HAS_MORE),
    ("contacts", "/contacts/v1/lists/all/contacts/all", VID_OFFSET),
];

/// The full catalog against `base_url`
pub fn default_catalog(base_url: &str) -> Vec<EndpointDescriptor> {
    let base = base_url.trim_end_matches('/');
    ENDPOINTS
        .iter()
        .map(|(name, path, strategy)| {
            EndpointDescriptor::new(*name, format!("{base}{path}"), *strategy)
        })
        .collect()
}

/// Names of all catalog endpoints, in export order
pub fn endpoint_names() -> Vec<&'static str> {
    ENDPOINTS.iter().map(|(name, _, _)| *name).collect()
}

/// Keep only the named endpoints, preserving catalog order
///
/// An empty selection keeps everything. Unknown names are rejected.
pub fn select(
    catalog: Vec<EndpointDescriptor>,
    names: &[String],
) -> Result<Vec<EndpointDescriptor>> {
    if names.is_empty() {
        return Ok(catalog);
    }

    let unknown: Vec<&str> = names
        .iter()
        .map(String::as_str)
        .filter(|n| !catalog.iter().any(|e| e.name == *n))
        .collect();
    if !unknown.is_empty() {
        return Err(Error::config(format!(
            "Unknown endpoint(s): {} (available: {})",
            unknown.join(", "),
            endpoint_names().join(", ")
        )));
    }

    Ok(catalog
        .into_iter()
        .filter(|e| names.iter().any(|n| *n == e.name))
        .collect())
}
