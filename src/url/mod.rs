//! URL handling module for pdf-harvest
//!
//! This module provides the stateless URL utilities the crawler is built on:
//! fragment-stripping normalization, same-site checks against the crawl
//! origin, and scope-path matching.

mod domain;
mod normalize;
mod scope;

// Re-export main functions
pub use domain::{same_site, site_authority};
pub use normalize::{normalize_url, strip_fragment};
pub use scope::{in_scope, ScopeMatch, ScopePath};

use url::Url;

/// Returns true if the URL is an http(s) URL the crawler can request
pub fn is_http(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}

/// Checks both crawl gates at once: same origin and inside the scope path
///
/// # Examples
///
/// ```
/// use url::Url;
/// use pdf_harvest::url::{is_crawlable, ScopePath};
///
/// let scope = ScopePath::new("/docs");
/// let page = Url::parse("https://example.com/docs/p2").unwrap();
/// assert!(is_crawlable(&page, "example.com", &scope));
///
/// let other = Url::parse("https://example.com/other").unwrap();
/// assert!(!is_crawlable(&other, "example.com", &scope));
/// ```
pub fn is_crawlable(url: &Url, origin: &str, scope: &ScopePath) -> bool {
    is_http(url) && same_site(url, origin) && in_scope(url, scope)
}
