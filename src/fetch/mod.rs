//! Page retrieval for the extraction pipeline
//!
//! This module contains the networking half of the crate:
//! - HTTP client construction with a User-Agent picked once per fetcher
//!   from a fixed pool of browser strings
//! - The order-preserving batch fetcher with a bounded in-flight cap
//! - Fetch error classification

mod batch;
mod client;

pub use batch::{FetchError, FetchedPage, Fetcher};
pub use client::build_http_client;
