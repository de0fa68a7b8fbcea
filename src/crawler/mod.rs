//! Crawler module for fetching pages and discovering links
//!
//! This module contains:
//! - HTTP client construction and HTML fetching
//! - One-hop same-host page discovery from a seed URL

mod discovery;
mod fetcher;

pub use discovery::{discover_pages, extract_hrefs, select_pages};
pub use fetcher::{build_http_client, fetch_html, FetchResult};
