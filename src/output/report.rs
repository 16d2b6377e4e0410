//! Crawl run report

use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// Summary of one crawl run
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// When the run started
    pub started_at: DateTime<Utc>,

    /// When the archive was finished
    pub finished_at: DateTime<Utc>,

    /// Pages that consumed budget (processed, non-HTML, failed)
    pub pages_visited: u32,

    /// Pages fetched as HTML
    pub pages_processed: usize,

    /// Pages fetched with a non-HTML Content-Type
    pub pages_non_html: usize,

    /// Pages whose fetch failed
    pub pages_failed: usize,

    /// Unique PDF URLs discovered
    pub pdfs_discovered: usize,

    /// PDFs stored and listed in the manifest
    pub pdfs_downloaded: usize,

    /// PDFs whose download failed
    pub download_failures: usize,

    /// Whether the run was cut short by a cancellation request
    pub cancelled: bool,

    /// Output folder
    pub out_dir: PathBuf,

    /// Manifest file
    pub manifest_path: PathBuf,

    /// Zip archive
    pub archive_path: PathBuf,
}

impl CrawlReport {
    /// Wall-clock duration of the run in seconds
    pub fn duration_seconds(&self) -> i64 {
        (self.finished_at - self.started_at).num_seconds()
    }

    /// PDFs discovered but neither downloaded nor failed (cancelled runs)
    pub fn pdfs_not_attempted(&self) -> usize {
        self.pdfs_discovered
            .saturating_sub(self.pdfs_downloaded + self.download_failures)
    }
}

/// Formats the report as the block the CLI prints at the end of a crawl
pub fn format_report(report: &CrawlReport) -> String {
    let mut lines = vec![
        "=== Crawl Summary ===".to_string(),
        String::new(),
        format!("Pages crawled: {}", report.pages_visited),
        format!(
            "  HTML: {}  Non-HTML: {}  Failed: {}",
            report.pages_processed, report.pages_non_html, report.pages_failed
        ),
        format!("PDFs discovered: {}", report.pdfs_discovered),
        format!("PDFs downloaded: {}", report.pdfs_downloaded),
        format!("Download failures: {}", report.download_failures),
    ];

    if report.pdfs_discovered == 0 {
        lines.push("No PDFs found; manifest is header-only".to_string());
    }
    if report.cancelled {
        lines.push(format!(
            "Cancelled: {} PDFs not attempted",
            report.pdfs_not_attempted()
        ));
    }

    lines.push(String::new());
    lines.push(format!("Output folder: {}", report.out_dir.display()));
    lines.push(format!("Manifest: {}", report.manifest_path.display()));
    lines.push(format!("Archive: {}", report.archive_path.display()));
    lines.push(format!(
        "Started: {}  Duration: {}s",
        report.started_at.to_rfc3339(),
        report.duration_seconds()
    ));

    lines.join("\n")
}

/// Prints the report to stdout
pub fn print_report(report: &CrawlReport) {
    println!("{}", format_report(report));
}
