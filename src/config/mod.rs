//! Configuration module for pdf-harvest
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file, and building the immutable [`CrawlTarget`] a run is
//! driven by.
//!
//! # Example
//!
//! ```no_run
//! use pdf_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("harvest.toml")).unwrap();
//! println!("Crawler will visit at most {} pages", config.crawler.max_pages);
//! ```

mod parser;
mod target;
mod types;
mod validation;

// Re-export types
pub use target::CrawlTarget;
pub use types::{
    Config, CrawlerConfig, OutputConfig, UserAgentConfig, DEFAULT_ARCHIVE_NAME,
    DEFAULT_DELAY_SECONDS, DEFAULT_MANIFEST_NAME, DEFAULT_MAX_PAGES,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
