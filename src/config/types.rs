use crate::url::ScopeMatch;
use serde::Deserialize;
use std::time::Duration;

/// Default page budget for a crawl run
pub const DEFAULT_MAX_PAGES: u32 = 250;

/// Default delay between consecutive network requests (seconds)
pub const DEFAULT_DELAY_SECONDS: f64 = 0.8;

/// Default timeout for fetching one HTML page (seconds)
pub const DEFAULT_PAGE_TIMEOUT_SECONDS: u64 = 30;

/// Default timeout for downloading one PDF (seconds)
pub const DEFAULT_DOWNLOAD_TIMEOUT_SECONDS: u64 = 120;

/// Default manifest file name inside the output folder
pub const DEFAULT_MANIFEST_NAME: &str = "manifest.csv";

/// Default archive file name inside the output folder
pub const DEFAULT_ARCHIVE_NAME: &str = "section_pdfs.zip";

/// Main configuration structure for pdf-harvest
///
/// Every section and key is optional in the TOML file; missing values fall
/// back to the defaults above. Command-line flags override file values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum number of HTML pages visited in one run
    #[serde(rename = "max-pages", default = "default_max_pages")]
    pub max_pages: u32,

    /// Delay between consecutive network requests (seconds, fractional allowed)
    #[serde(rename = "delay-seconds", default = "default_delay_seconds")]
    pub delay_seconds: f64,

    /// Timeout for a single page fetch (seconds)
    #[serde(
        rename = "page-timeout-seconds",
        default = "default_page_timeout_seconds"
    )]
    pub page_timeout_seconds: u64,

    /// Timeout for a single PDF download (seconds)
    #[serde(
        rename = "download-timeout-seconds",
        default = "default_download_timeout_seconds"
    )]
    pub download_timeout_seconds: u64,

    /// Use path-segment aware scope matching instead of a literal prefix
    #[serde(rename = "segment-scope", default)]
    pub segment_scope: bool,
}

impl CrawlerConfig {
    /// Returns the inter-request delay as a Duration
    ///
    /// Negative or non-finite values (rejected by validation) collapse to zero.
    pub fn delay(&self) -> Duration {
        if self.delay_seconds.is_finite() && self.delay_seconds > 0.0 {
            Duration::from_secs_f64(self.delay_seconds)
        } else {
            Duration::ZERO
        }
    }

    pub fn page_timeout(&self) -> Duration {
        Duration::from_secs(self.page_timeout_seconds)
    }

    pub fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.download_timeout_seconds)
    }

    /// Returns the scope matching mode selected by `segment-scope`
    pub fn scope_match(&self) -> ScopeMatch {
        if self.segment_scope {
            ScopeMatch::Segment
        } else {
            ScopeMatch::Prefix
        }
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_pages: DEFAULT_MAX_PAGES,
            delay_seconds: DEFAULT_DELAY_SECONDS,
            page_timeout_seconds: DEFAULT_PAGE_TIMEOUT_SECONDS,
            download_timeout_seconds: DEFAULT_DOWNLOAD_TIMEOUT_SECONDS,
            segment_scope: false,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name", default = "default_crawler_name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version", default = "default_crawler_version")]
    pub crawler_version: String,
}

impl UserAgentConfig {
    /// Formats the identifying User-Agent header value
    ///
    /// Format: `Mozilla/5.0 (compatible; CrawlerName/Version)`
    pub fn user_agent_string(&self) -> String {
        format!(
            "Mozilla/5.0 (compatible; {}/{})",
            self.crawler_name, self.crawler_version
        )
    }
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: default_crawler_name(),
            crawler_version: default_crawler_version(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// File name of the CSV manifest written into the output folder
    #[serde(rename = "manifest-name", default = "default_manifest_name")]
    pub manifest_name: String,

    /// File name of the zip archive written into the output folder
    #[serde(rename = "archive-name", default = "default_archive_name")]
    pub archive_name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            manifest_name: default_manifest_name(),
            archive_name: default_archive_name(),
        }
    }
}

fn default_max_pages() -> u32 {
    DEFAULT_MAX_PAGES
}

fn default_delay_seconds() -> f64 {
    DEFAULT_DELAY_SECONDS
}

fn default_page_timeout_seconds() -> u64 {
    DEFAULT_PAGE_TIMEOUT_SECONDS
}

fn default_download_timeout_seconds() -> u64 {
    DEFAULT_DOWNLOAD_TIMEOUT_SECONDS
}

fn default_crawler_name() -> String {
    "Section-PDF-Crawler".to_string()
}

fn default_crawler_version() -> String {
    "1.0".to_string()
}

fn default_manifest_name() -> String {
    DEFAULT_MANIFEST_NAME.to_string()
}

fn default_archive_name() -> String {
    DEFAULT_ARCHIVE_NAME.to_string()
}
