//! pdf-harvest: a scoped section crawler for PDF documents
//!
//! This crate crawls one section of a website breadth-first, bounded by a
//! URL path prefix, collects every PDF linked from the pages it visits,
//! downloads each unique PDF once, and records a CSV manifest plus a zip
//! archive of the result. Two standalone utilities ship alongside the
//! crawler: content-hash deduplication of a PDF folder and per-file PDF
//! text extraction.

pub mod config;
pub mod crawler;
pub mod dedupe;
pub mod digest;
pub mod download;
pub mod extract;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for pdf-harvest operations
///
/// Only conditions that abort a whole run surface as `HarvestError`.
/// Per-page and per-file failures are reported through
/// [`crawler::FetchResult`], [`download::DownloadError`] and
/// [`extract::ExtractError`] and never escape the run loop.
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("Invalid start URL '{url}': {reason}")]
    InvalidStartUrl { url: String, reason: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to write manifest {path}: {source}")]
    Manifest { path: String, source: csv::Error },

    #[error("Failed to build archive {path}: {source}")]
    Archive {
        path: String,
        source: zip::result::ZipError,
    },

    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),
}

/// Result type alias for pdf-harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

// Re-export commonly used types
pub use config::{Config, CrawlTarget};
pub use crawler::{CancelFlag, Coordinator};
pub use output::CrawlReport;
pub use state::PageState;
pub use crate::url::{in_scope, normalize_url, same_site, ScopeMatch, ScopePath};
