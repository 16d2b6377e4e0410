use crate::config::types::CrawlerConfig;
use crate::url::{is_http, normalize_url, site_authority, ScopePath};
use crate::HarvestError;
use std::time::Duration;
use url::Url;

/// The fixed inputs of one crawl run
///
/// A `CrawlTarget` is built once, before any network activity, and never
/// changes afterwards. Construction fails if the start URL cannot be parsed,
/// is not http(s), or has no host: those are the only fatal input errors.
#[derive(Debug, Clone)]
pub struct CrawlTarget {
    start_url: Url,
    origin: String,
    scope: ScopePath,
    max_pages: u32,
    delay: Duration,
}

impl CrawlTarget {
    /// Creates a crawl target from a raw start URL
    ///
    /// # Example
    ///
    /// ```
    /// use std::time::Duration;
    /// use pdf_harvest::config::CrawlTarget;
    /// use pdf_harvest::url::ScopePath;
    ///
    /// let target = CrawlTarget::new(
    ///     "https://www.example.org/consumers-corner#top",
    ///     ScopePath::new("/consumers-corner"),
    ///     250,
    ///     Duration::from_millis(800),
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(target.start_url().as_str(), "https://www.example.org/consumers-corner");
    /// assert_eq!(target.origin(), "www.example.org");
    /// ```
    pub fn new(
        start_url: &str,
        scope: ScopePath,
        max_pages: u32,
        delay: Duration,
    ) -> Result<Self, HarvestError> {
        let invalid = |reason: String| HarvestError::InvalidStartUrl {
            url: start_url.to_string(),
            reason,
        };

        let url = normalize_url(start_url).map_err(|e| invalid(e.to_string()))?;

        if !is_http(&url) {
            return Err(invalid(format!(
                "only http and https are supported, got {}",
                url.scheme()
            )));
        }

        let origin = site_authority(&url).ok_or_else(|| invalid("missing host".to_string()))?;

        Ok(Self {
            start_url: url,
            origin,
            scope,
            max_pages,
            delay,
        })
    }

    /// Creates a crawl target taking budget, delay and scope mode from config
    pub fn from_config(
        start_url: &str,
        scope_prefix: &str,
        config: &CrawlerConfig,
    ) -> Result<Self, HarvestError> {
        let scope = ScopePath::new(scope_prefix).with_mode(config.scope_match());
        Self::new(start_url, scope, config.max_pages, config.delay())
    }

    pub fn start_url(&self) -> &Url {
        &self.start_url
    }

    /// The lowercase `host[:port]` every crawled page must share
    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn scope(&self) -> &ScopePath {
        &self.scope
    }

    pub fn max_pages(&self) -> u32 {
        self.max_pages
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}
