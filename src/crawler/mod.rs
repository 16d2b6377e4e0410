//! Crawler module for scoped section crawls
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with Content-Type gating
//! - HTML parsing into page links and PDF links
//! - Frontier, budget and discovery bookkeeping
//! - Overall crawl coordination, downloads included

mod coordinator;
mod fetcher;
mod parser;
mod scheduler;

pub use coordinator::{run_crawl, CancelFlag, Coordinator};
pub use fetcher::{build_http_client, fetch_page, is_html, FetchResult};
pub use parser::{extract_links, is_pdf_url, parse_html, ParsedPage, PdfLink};
pub use scheduler::{DiscoveredPdf, Scheduler};
