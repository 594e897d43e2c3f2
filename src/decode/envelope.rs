//! Collection envelope parsing
//!
//! Extracts the item list and pagination fields from one response body.

use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue};
use serde::{Deserialize, Serialize};

/// Key used by the content APIs for the item list
pub const OBJECTS_KEY: &str = "objects";

/// Where a collection response keeps its items
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemLocation {
    /// `"objects"` first, then the endpoint name
    #[default]
    Probe,
    /// Always `"objects"`
    Objects,
    /// Always the given field
    Field(String),
}

/// Which key the items were actually read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemSource {
    /// Found under `"objects"`
    Objects,
    /// Found under the named field
    Named(String),
    /// No item list in the response
    Missing,
}

/// Response field that carries the next cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CursorField {
    /// `offset`, used by lists, deals and companies
    Offset,
    /// `vid-offset`, used by contacts
    VidOffset,
}

impl CursorField {
    /// JSON key in the response body
    pub fn response_key(self) -> &'static str {
        match self {
            Self::Offset => "offset",
            Self::VidOffset => "vid-offset",
        }
    }

    /// Query parameter that sends the cursor back
    pub fn query_param(self) -> &'static str {
        match self {
            Self::Offset => "offset",
            Self::VidOffset => "vidOffset",
        }
    }
}

/// Parsed collection response
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    /// Item documents, in response order
    pub items: Vec<JsonValue>,
    /// Where the items were found
    pub source: ItemSource,
    /// `has-more` flag (absent means false)
    pub has_more: bool,
    /// `offset` field, if numeric
    pub offset: Option<u64>,
    /// `vid-offset` field, if numeric
    pub vid_offset: Option<u64>,
}

impl Envelope {
    /// Whether the page carried no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of items on the page
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// The cursor value for the given field
    pub fn cursor(&self, field: CursorField) -> Option<u64> {
        match field {
            CursorField::Offset => self.offset,
            CursorField::VidOffset => self.vid_offset,
        }
    }
}

/// Parser bound to one endpoint
#[derive(Debug, Clone)]
pub struct EnvelopeParser {
    endpoint: String,
    location: ItemLocation,
}

impl EnvelopeParser {
    /// Create a parser using the default probing order
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            location: ItemLocation::Probe,
        }
    }

    /// Set the item location
    #[must_use]
    pub fn with_location(mut self, location: ItemLocation) -> Self {
        self.location = location;
        self
    }

    /// Endpoint this parser belongs to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Parse a raw response body
    pub fn parse(&self, body: &str) -> Result<Envelope> {
        let value: JsonValue = serde_json::from_str(body)
            .map_err(|e| Error::malformed(&self.endpoint, format!("invalid JSON: {e}")))?;

        let JsonValue::Object(mut map) = value else {
            return Err(Error::malformed(
                &self.endpoint,
                "response body is not a JSON object",
            ));
        };

        let (items, source) = self.take_items(&mut map)?;

        Ok(Envelope {
            items,
            source,
            has_more: map
                .get("has-more")
                .and_then(JsonValue::as_bool)
                .unwrap_or(false),
            offset: map.get("offset").and_then(as_cursor),
            vid_offset: map.get("vid-offset").and_then(as_cursor),
        })
    }

    fn take_items(&self, map: &mut JsonObject) -> Result<(Vec<JsonValue>, ItemSource)> {
        let candidates: Vec<&str> = match &self.location {
            ItemLocation::Probe => vec![OBJECTS_KEY, self.endpoint.as_str()],
            ItemLocation::Objects => vec![OBJECTS_KEY],
            ItemLocation::Field(name) => vec![name.as_str()],
        };

        for key in candidates {
            match map.remove(key) {
                None | Some(JsonValue::Null) => {}
                Some(JsonValue::Array(items)) => {
                    let source = if key == OBJECTS_KEY {
                        ItemSource::Objects
                    } else {
                        ItemSource::Named(key.to_string())
                    };
                    return Ok((items, source));
                }
                Some(other) => {
                    return Err(Error::malformed(
                        &self.endpoint,
                        format!("field '{key}' is {}, expected an array", type_name(&other)),
                    ));
                }
            }
        }

        Ok((Vec::new(), ItemSource::Missing))
    }
}

/// Read a numeric cursor; non-negative floats are truncated toward zero
fn as_cursor(value: &JsonValue) -> Option<u64> {
    value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.is_finite() && *f >= 0.0)
            .map(|f| f as u64)
    })
}

fn type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}
