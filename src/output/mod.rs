//! Output module for the artifacts of a crawl run
//!
//! This module handles:
//! - Writing the CSV manifest of downloaded PDFs
//! - Bundling the output folder into a zip archive
//! - Summarizing the run in a `CrawlReport`

mod archive;
mod manifest;
mod report;

pub use archive::{create_archive, entry_name};
pub use manifest::{read_manifest, write_manifest, ManifestRow, MANIFEST_HEADER};
pub use report::{format_report, print_report, CrawlReport};
