use url::Url;

/// Extracts the lowercase host from a URL string
///
/// Unparseable URLs and URLs without a host yield `None`. The port is not
/// part of the host, so `example.com:8080` and `example.com` share a host.
///
/// # Arguments
///
/// * `url` - The absolute URL string
///
/// # Returns
///
/// * `Some(String)` - The lowercase host
/// * `None` - If the URL cannot be parsed or has no host
///
/// # Examples
///
/// ```
/// use a11y_audit::url::extract_host;
///
/// assert_eq!(extract_host("https://EXAMPLE.com/path"), Some("example.com".to_string()));
/// assert_eq!(extract_host("not a url"), None);
/// ```
pub fn extract_host(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_lowercase()))
}

/// Checks whether a candidate link lives on the given host
///
/// # Arguments
///
/// * `candidate` - The absolute link to test
/// * `host` - The lowercase seed host
pub fn is_same_host(candidate: &str, host: &str) -> bool {
    extract_host(candidate).is_some_and(|h| h == host)
}
