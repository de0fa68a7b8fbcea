use regex::Regex;
use std::sync::LazyLock;

/// Patterns for links that are never HTML pages worth scanning
static SKIP_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // Documents and archives
        r"(?i)\.(pdf|doc|docx|xls|xlsx|ppt|pptx|zip|rar|tar|gz)$",
        // Images
        r"(?i)\.(jpg|jpeg|png|gif|webp|svg|ico)$",
        // Audio and video
        r"(?i)\.(mp3|mp4|avi|mov|wmv|wav)$",
        // Tracking parameters
        r"\?(utm_|fbclid|gclid)",
        // WordPress admin and commerce paths
        r"(?i)/wp-admin/",
        r"(?i)/wp-login",
        r"(?i)/cart/?$",
        r"(?i)/checkout/?$",
        r"(?i)/my-account/?$",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("hardcoded regex pattern is valid"))
    .collect()
});

/// Checks whether a normalized link matches any skip pattern
///
/// Links are skipped when they point at non-HTML assets (documents,
/// archives, images, audio/video), carry tracking parameters, or lead into
/// WordPress administration or shop account/checkout pages.
///
/// # Arguments
///
/// * `url` - The absolute, normalized link
///
/// # Returns
///
/// * `true` - The link should not be scanned
/// * `false` - Otherwise
///
/// # Examples
///
/// ```
/// use a11y_audit::url::should_skip_url;
///
/// assert!(should_skip_url("https://example.com/brochure.PDF"));
/// assert!(should_skip_url("https://example.com/wp-admin/options.php"));
/// assert!(!should_skip_url("https://example.com/about"));
/// ```
pub fn should_skip_url(url: &str) -> bool {
    SKIP_PATTERNS.iter().any(|re| re.is_match(url))
}
