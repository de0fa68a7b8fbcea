use url::Url;

/// Schemes and prefixes that never lead to a scannable page
const IGNORED_PREFIXES: &[&str] = &["javascript:", "mailto:", "tel:", "#"];

/// Resolves a raw `href` value against the seed URL
///
/// # Normalization Steps
///
/// 1. Discard empty links, `javascript:`/`mailto:`/`tel:` links and bare fragments
/// 2. Resolve the link:
///    - protocol-relative (`//host/path`): prefix with the seed's scheme
///    - root-relative (`/path`): prefix with the seed's scheme and authority
///    - relative (`path`): append to the seed with its trailing slash stripped
///    - anything starting with `http` is taken as absolute
/// 3. Strip the fragment and any trailing slash
///
/// # Arguments
///
/// * `link` - The raw `href` attribute value
/// * `seed` - The URL the link was found on
///
/// # Returns
///
/// * `Some(String)` - The absolute, normalized link
/// * `None` - The link can never be a page
///
/// # Examples
///
/// ```
/// use a11y_audit::url::normalize_link;
/// use url::Url;
///
/// let seed = Url::parse("https://example.com/").unwrap();
/// assert_eq!(
///     normalize_link("/about/#team", &seed),
///     Some("https://example.com/about".to_string())
/// );
/// assert_eq!(normalize_link("mailto:hi@example.com", &seed), None);
/// ```
pub fn normalize_link(link: &str, seed: &Url) -> Option<String> {
    let link = link.trim();
    if link.is_empty() {
        return None;
    }

    let lowered = link.to_ascii_lowercase();
    if IGNORED_PREFIXES.iter().any(|p| lowered.starts_with(p)) {
        return None;
    }

    let absolute = if link.starts_with("//") {
        format!("{}:{}", seed.scheme(), link)
    } else if link.starts_with('/') {
        format!("{}{}", authority(seed), link)
    } else if !lowered.starts_with("http") {
        format!("{}/{}", seed.as_str().trim_end_matches('/'), link)
    } else {
        link.to_string()
    };

    Some(canonical_form(&absolute))
}

/// Strips the fragment and trailing slashes, the form used for deduplication
///
/// # Examples
///
/// ```
/// use a11y_audit::url::canonical_form;
///
/// assert_eq!(canonical_form("https://example.com/"), "https://example.com");
/// assert_eq!(canonical_form("https://example.com/a/#x"), "https://example.com/a");
/// ```
pub fn canonical_form(url: &str) -> String {
    let without_fragment = match url.find('#') {
        Some(idx) => &url[..idx],
        None => url,
    };
    without_fragment.trim_end_matches('/').to_string()
}

/// `scheme://host[:port]` of a URL
fn authority(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    match url.port() {
        Some(port) => format!("{}://{}:{}", url.scheme(), host, port),
        None => format!("{}://{}", url.scheme(), host),
    }
}
