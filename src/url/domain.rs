use url::Url;

/// Extracts the site authority (`host` or `host:port`) from a URL
///
/// The host is lowercased. An explicit port is kept only when it differs
/// from the scheme's default, so `https://example.com:443/` and
/// `https://example.com/` share an authority while a dev server on
/// `127.0.0.1:8080` stays distinct from `127.0.0.1:9090`.
///
/// # Returns
///
/// * `Some(String)` - The lowercase authority
/// * `None` - If the URL has no host (`mailto:`, `data:` and friends)
///
/// # Examples
///
/// ```
/// use url::Url;
/// use pdf_harvest::url::site_authority;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(site_authority(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("http://127.0.0.1:8080/").unwrap();
/// assert_eq!(site_authority(&url), Some("127.0.0.1:8080".to_string()));
/// ```
pub fn site_authority(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_lowercase();
    match url.port() {
        Some(port) => Some(format!("{}:{}", host, port)),
        None => Some(host),
    }
}

/// Checks whether a URL belongs to the crawl origin
///
/// Comparison is case-insensitive. URLs without a host are never same-site.
pub fn same_site(url: &Url, origin: &str) -> bool {
    site_authority(url)
        .map(|authority| authority.eq_ignore_ascii_case(origin))
        .unwrap_or(false)
}
