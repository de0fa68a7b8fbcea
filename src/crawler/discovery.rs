//! One-hop page discovery from a seed URL
//!
//! Links are pulled out of the raw seed markup with a pattern match rather
//! than a DOM parse, so discovery keeps working on badly broken HTML.

use crate::crawler::fetcher::{fetch_html, FetchResult};
use crate::url::{canonical_form, extract_host, is_same_host, normalize_link, should_skip_url};
use regex::Regex;
use reqwest::Client;
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::{debug, info, warn};
use url::Url;

static HREF_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<a[^>]+href=["']([^"']+)["'][^>]*>"#).expect("hardcoded regex pattern is valid")
});

/// Extracts every anchor `href` value from raw markup, in document order
///
/// # Examples
///
/// ```
/// use a11y_audit::crawler::extract_hrefs;
///
/// let html = r#"<p><a class="x" href="/one">1</a> <A HREF='two'>2</A></p>"#;
/// assert_eq!(extract_hrefs(html), vec!["/one", "two"]);
/// ```
pub fn extract_hrefs(html: &str) -> Vec<String> {
    HREF_PATTERN
        .captures_iter(html)
        .filter_map(|c| c.get(1).map(|m| m.as_str().to_string()))
        .collect()
}

/// Selects scannable same-host pages from the links found in `html`
///
/// The seed is always element 0 and the result never exceeds `limit`
/// entries. This is the pure half of [`discover_pages`].
///
/// # Arguments
///
/// * `seed` - The seed URL exactly as requested
/// * `html` - The seed page markup
/// * `limit` - The page budget, inclusive of the seed
pub fn select_pages(seed: &str, html: &str, limit: usize) -> Vec<String> {
    let mut pages = vec![seed.to_string()];
    if limit <= 1 {
        return pages;
    }

    let (seed_url, seed_host) = match Url::parse(seed).ok().zip(extract_host(seed)) {
        Some(parsed) => parsed,
        None => return pages,
    };

    let mut seen: HashSet<String> = HashSet::new();
    seen.insert(canonical_form(seed));

    for href in extract_hrefs(html) {
        let Some(link) = normalize_link(&href, &seed_url) else {
            continue;
        };
        if !is_same_host(&link, &seed_host) {
            continue;
        }
        if should_skip_url(&link) {
            debug!("Skipping {}", link);
            continue;
        }
        if !seen.insert(link.clone()) {
            continue;
        }

        pages.push(link);
        if pages.len() >= limit {
            break;
        }
    }

    pages
}

/// Discovers up to `limit` pages reachable in one hop from `seed`
///
/// A failed seed fetch is not an error: discovery degrades to scanning just
/// the seed.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `seed` - The absolute seed URL
/// * `limit` - The page budget, inclusive of the seed
///
/// # Returns
///
/// The ordered, deduplicated page list, seed first
pub async fn discover_pages(client: &Client, seed: &str, limit: usize) -> Vec<String> {
    if limit <= 1 {
        return vec![seed.to_string()];
    }

    let html = match fetch_html(client, seed).await {
        FetchResult::Success { body, .. } => body,
        failure => {
            let reason = failure.into_body().err().unwrap_or_default();
            warn!("Discovery fetch failed for {}: {}; scanning seed only", seed, reason);
            return vec![seed.to_string()];
        }
    };

    let pages = select_pages(seed, &html, limit);
    info!("Discovered {} page(s) from {}", pages.len(), seed);
    pages
}
