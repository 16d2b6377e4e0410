use crate::UrlError;
use url::Url;

/// Normalizes a URL for use as a crawl key
///
/// # Normalization Steps
///
/// 1. Trim surrounding whitespace and parse the URL; reject if malformed
/// 2. Remove fragment (everything after #)
///
/// Nothing else is rewritten: query strings, trailing slashes and path case
/// are preserved, so two URLs differing only in their fragment map to the
/// same key and every other distinction survives. Parsing applies the WHATWG
/// canonical form (lowercase scheme and host, `/` for an empty path), which
/// makes the operation idempotent.
///
/// # Arguments
///
/// * `url_str` - The URL string to normalize
///
/// # Returns
///
/// * `Ok(Url)` - Normalized URL
/// * `Err(UrlError)` - Failed to parse the URL
///
/// # Examples
///
/// ```
/// use pdf_harvest::url::normalize_url;
///
/// let url = normalize_url("https://example.com/docs/page#section").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/docs/page");
/// ```
pub fn normalize_url(url_str: &str) -> Result<Url, UrlError> {
    let url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;
    Ok(strip_fragment(url))
}

/// Removes the fragment component from an already parsed URL
pub fn strip_fragment(mut url: Url) -> Url {
    url.set_fragment(None);
    url
}
