//! HTTP client module
//!
//! The remote fetch step: one authenticated GET per page.
//!
//! # Features
//!
//! - **Bearer Authentication**: token applied to every request
//! - **Raw Responses**: status and body are returned as-is, the caller decides
//!   what a non-2xx status means for its endpoint
//! - **Error Envelopes**: HubSpot `{"message": ...}` bodies are decoded for reporting
//!
//! Requests are never retried.

mod client;

pub use client::{ApiErrorBody, HttpClient, HttpClientConfig, RawResponse, RequestConfig};
