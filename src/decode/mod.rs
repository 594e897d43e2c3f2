//! Response decoder module
//!
//! Parses HubSpot collection responses into an [`Envelope`].
//!
//! # Overview
//!
//! The remote API family keeps the item list under `"objects"` for the
//! content APIs and under the endpoint name (`"deals"`, `"contacts"`, ...)
//! for the CRM APIs. Pagination fields are `has-more` plus either `offset`
//! or `vid-offset`. The parser records which of these it found so callers
//! work with a tagged result instead of probing keys themselves.

mod envelope;

pub use envelope::{CursorField, Envelope, EnvelopeParser, ItemLocation, ItemSource};
