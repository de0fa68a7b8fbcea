//! URL handling for page discovery
//!
//! This module provides link normalization against a seed page, host
//! extraction for the same-host filter, and the skip-pattern filter.

mod domain;
mod matcher;
mod normalize;

// Re-export main functions
pub use domain::{extract_host, is_same_host};
pub use matcher::should_skip_url;
pub use normalize::{canonical_form, normalize_link};
