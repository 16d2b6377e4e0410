//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the run loop that coordinates a whole crawl:
//! - Driving the scheduler, fetcher and parser breadth-first
//! - Throttling every network request
//! - Downloading discovered PDFs in discovery order
//! - Writing the manifest and the archive
//! - Stopping cleanly on a cancellation request

use crate::config::{Config, CrawlTarget};
use crate::crawler::parser::parse_html;
use crate::crawler::scheduler::{DiscoveredPdf, Scheduler};
use crate::crawler::{build_http_client, fetch_page, FetchResult};
use crate::download::{download_file, FilenameResolver};
use crate::output::{create_archive, write_manifest, CrawlReport, ManifestRow};
use crate::state::{PageState, RequestThrottle};
use crate::url::{is_crawlable, same_site};
use crate::HarvestError;
use chrono::Utc;
use reqwest::Client;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use url::Url;

/// Shared flag used to ask a running crawl to stop
///
/// Clones observe the same flag. The coordinator checks it between pages
/// and between downloads, so an in-flight request always completes first.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Outcome of the download phase
#[derive(Debug, Default)]
struct DownloadOutcome {
    rows: Vec<ManifestRow>,
    failures: usize,
}

/// Main crawler coordinator structure
pub struct Coordinator {
    config: Config,
    scheduler: Scheduler,
    throttle: RequestThrottle,
    client: Client,
    out_dir: PathBuf,
    cancel: CancelFlag,
    cancelled: bool,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// Builds the HTTP client and seeds the frontier with the target's start
    /// URL. Nothing touches the network or the filesystem until [`run`].
    ///
    /// [`run`]: Coordinator::run
    pub fn new(
        config: Config,
        target: CrawlTarget,
        out_dir: impl Into<PathBuf>,
    ) -> Result<Self, HarvestError> {
        let client = build_http_client(&config.user_agent)?;
        let throttle = RequestThrottle::new(target.delay());

        Ok(Self {
            config,
            scheduler: Scheduler::new(target),
            throttle,
            client,
            out_dir: out_dir.into(),
            cancel: CancelFlag::new(),
            cancelled: false,
        })
    }

    /// Replaces the cancellation flag with one shared with the caller
    pub fn with_cancel_flag(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    /// Returns a handle that can cancel this coordinator's run
    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.out_dir.join(&self.config.output.manifest_name)
    }

    pub fn archive_path(&self) -> PathBuf {
        self.out_dir.join(&self.config.output.archive_name)
    }

    /// Runs the whole crawl
    ///
    /// 1. Creates the output folder (fatal on failure)
    /// 2. Crawls pages until the frontier is empty, the budget is spent or
    ///    cancellation is requested
    /// 3. Downloads every discovered PDF in discovery order
    /// 4. Writes the manifest, then archives the output folder
    ///
    /// Per-page and per-download failures are logged and counted; only
    /// output-folder, manifest and archive failures abort the run.
    pub async fn run(mut self) -> Result<CrawlReport, HarvestError> {
        let started_at = Utc::now();
        tokio::fs::create_dir_all(&self.out_dir).await?;

        self.crawl().await;

        let pdfs = self.scheduler.take_discovered();
        let outcome = self.download_all(&pdfs).await;

        let manifest_path = self.manifest_path();
        write_manifest(&manifest_path, &outcome.rows).map_err(|source| {
            HarvestError::Manifest {
                path: manifest_path.display().to_string(),
                source,
            }
        })?;
        tracing::info!(
            "Wrote manifest with {} rows: {}",
            outcome.rows.len(),
            manifest_path.display()
        );

        let archive_path = self.archive_path();
        let entries = build_archive(self.out_dir.clone(), archive_path.clone()).await?;
        tracing::info!("Archived {} files: {}", entries, archive_path.display());

        Ok(CrawlReport {
            started_at,
            finished_at: Utc::now(),
            pages_visited: self.scheduler.visited_count(),
            pages_processed: self.scheduler.count_by_state(PageState::Processed),
            pages_non_html: self.scheduler.count_by_state(PageState::NonHtml),
            pages_failed: self.scheduler.count_by_state(PageState::Failed),
            pdfs_discovered: pdfs.len(),
            pdfs_downloaded: outcome.rows.len(),
            download_failures: outcome.failures,
            cancelled: self.cancelled,
            out_dir: self.out_dir,
            manifest_path,
            archive_path,
        })
    }

    /// Runs the page loop
    async fn crawl(&mut self) {
        let target = self.scheduler.target();
        tracing::info!("Crawling section: {}", target.start_url());
        tracing::info!("Scope path: {}", target.scope().prefix());
        tracing::info!("Max pages: {}", target.max_pages());

        if !is_crawlable(target.start_url(), target.origin(), target.scope()) {
            tracing::warn!(
                "Start URL {} is outside scope {}; nothing will be crawled",
                target.start_url(),
                target.scope().prefix()
            );
        }

        loop {
            if self.check_cancelled() {
                tracing::info!("Cancellation requested, stopping crawl");
                break;
            }

            let Some(url) = self.scheduler.next_url() else {
                break;
            };

            let state = self.process_page(&url).await;
            self.scheduler.complete(&url, state);
        }

        tracing::info!(
            "Crawl finished: {} pages visited, {} PDFs discovered, {} URLs left in frontier",
            self.scheduler.visited_count(),
            self.scheduler.discovered().len(),
            self.scheduler.frontier_size()
        );
    }

    /// Fetches one page and folds its links into the scheduler
    ///
    /// Returns the terminal state the page settles in.
    async fn process_page(&mut self, url: &Url) -> PageState {
        self.throttle.wait_turn().await;

        let timeout = self.config.crawler.page_timeout();
        let result = fetch_page(&self.client, url, timeout).await;
        self.throttle.finish();
        let state = result.page_state();
        let progress = format!(
            "[{}/{}]",
            self.scheduler.visited_count() + 1,
            self.scheduler.max_pages()
        );

        match result {
            FetchResult::Success { final_url, body, .. } => {
                let origin = self.scheduler.target().origin();
                if !same_site(&final_url, origin) {
                    tracing::warn!(
                        "{} {} redirected off-site to {}, ignoring its links",
                        progress,
                        url,
                        final_url
                    );
                    return state;
                }

                let parsed = match parse_html(&body, &final_url) {
                    Ok(parsed) => parsed,
                    Err(e) => {
                        tracing::warn!("Failed to parse HTML for {}: {}", url, e);
                        return PageState::Failed;
                    }
                };

                let pdf_count = parsed.pdf_links.len();
                let link_count = parsed.page_links.len();
                let new_pdfs = self.scheduler.record_pdfs(url, parsed.pdf_links);
                let queued = self.scheduler.enqueue_links(parsed.page_links);

                tracing::info!(
                    "{} {} | PDFs: {} ({} new) | Links: {}",
                    progress,
                    url,
                    pdf_count,
                    new_pdfs,
                    link_count
                );
                tracing::debug!("Enqueued {} new pages from {}", queued, url);
            }
            FetchResult::ContentMismatch { content_type, .. } => {
                tracing::debug!("{} {} is not HTML ({})", progress, url, content_type);
            }
            failed => {
                let reason = failed.failure_reason().unwrap_or_default();
                tracing::warn!("{} Failed page: {} :: {}", progress, url, reason);
            }
        }

        state
    }

    /// Downloads every discovered PDF, one at a time
    async fn download_all(&mut self, pdfs: &[DiscoveredPdf]) -> DownloadOutcome {
        let mut outcome = DownloadOutcome::default();
        if pdfs.is_empty() {
            tracing::info!("No PDFs discovered");
            return outcome;
        }

        tracing::info!("Downloading {} unique PDFs", pdfs.len());

        let mut resolver = FilenameResolver::new();
        resolver.reserve(&self.config.output.manifest_name);
        resolver.reserve(&self.config.output.archive_name);

        let timeout = self.config.crawler.download_timeout();

        for (idx, pdf) in pdfs.iter().enumerate() {
            if self.check_cancelled() {
                tracing::info!(
                    "Cancellation requested, skipping {} remaining downloads",
                    pdfs.len() - idx
                );
                break;
            }

            let ordinal = idx + 1;
            let filename = resolver.resolve(&pdf.url, &pdf.anchor_text, ordinal);
            let dest = self.out_dir.join(&filename);

            self.throttle.wait_turn().await;
            tracing::info!("[DL {}/{}] {} -> {}", ordinal, pdfs.len(), pdf.url, filename);

            let result = download_file(&self.client, &pdf.url, &dest, timeout).await;
            self.throttle.finish();

            match result {
                Ok(file) => outcome.rows.push(ManifestRow {
                    pdf_url: pdf.url.to_string(),
                    local_path: filename,
                    bytes: file.digest.bytes,
                    sha256: file.digest.sha256,
                    first_seen_page_url: pdf.first_seen.to_string(),
                }),
                Err(e) => {
                    tracing::warn!("Download failed: {} :: {}", pdf.url, e);
                    outcome.failures += 1;
                }
            }
        }

        outcome
    }

    fn check_cancelled(&mut self) -> bool {
        if self.cancel.is_cancelled() {
            self.cancelled = true;
        }
        self.cancelled
    }
}

/// Archives the output folder on the blocking pool
async fn build_archive(out_dir: PathBuf, archive_path: PathBuf) -> Result<usize, HarvestError> {
    let path_for_error = archive_path.clone();
    tokio::task::spawn_blocking(move || create_archive(&out_dir, &archive_path))
        .await?
        .map_err(|source| HarvestError::Archive {
            path: path_for_error.display().to_string(),
            source,
        })
}

/// Runs a complete crawl
///
/// This is the main entry point for starting a crawl.
///
/// # Example
///
/// ```no_run
/// use pdf_harvest::config::{Config, CrawlTarget};
/// use pdf_harvest::crawler::run_crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Config::default();
/// let target = CrawlTarget::from_config(
///     "https://www.example.org/consumers-corner",
///     "/consumers-corner",
///     &config.crawler,
/// )?;
/// let report = run_crawl(config, target, "consumers_corner_pdfs").await?;
/// println!("{} PDFs downloaded", report.pdfs_downloaded);
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(
    config: Config,
    target: CrawlTarget,
    out_dir: impl AsRef<Path>,
) -> Result<CrawlReport, HarvestError> {
    Coordinator::new(config, target, out_dir.as_ref())?.run().await
}
