//! Scheduler for managing the crawl frontier and the page budget
//!
//! This module handles:
//! - FIFO frontier management (breadth-first order)
//! - Per-URL page state tracking, so no page is fetched twice
//! - Enforcing the page budget before every dequeue
//! - Re-checking same-site and scope gates at dequeue time
//! - Accumulating discovered PDFs with first-write-wins semantics

use super::parser::PdfLink;
use crate::config::CrawlTarget;
use crate::state::PageState;
use crate::url::is_crawlable;
use std::collections::{HashMap, HashSet, VecDeque};
use url::Url;

/// A PDF discovered during the crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredPdf {
    /// Normalized PDF URL
    pub url: Url,

    /// Anchor text from the first page that referenced it (may be empty)
    pub anchor_text: String,

    /// The first page URL that referenced it
    pub first_seen: Url,
}

/// Scheduler manages the frontier queue and crawl bookkeeping
///
/// The scheduler coordinates:
/// - The page budget (a page counts once a fetch was attempted)
/// - Frontier order (first in, first out)
/// - Which pages have been seen, and in which state they settled
/// - The insertion-ordered PDF discovery map
pub struct Scheduler {
    /// Fixed crawl inputs: start URL, origin, scope and budget
    target: CrawlTarget,

    /// URLs waiting to be fetched
    frontier: VecDeque<Url>,

    /// Every page URL the scheduler has seen and its current state
    pages: HashMap<Url, PageState>,

    /// Number of pages in a visited state
    visited_count: u32,

    /// Discovered PDFs in discovery order
    discovered: Vec<DiscoveredPdf>,

    /// Index over `discovered` for membership checks
    discovered_urls: HashSet<Url>,
}

impl Scheduler {
    /// Creates a scheduler whose frontier holds only the start URL
    pub fn new(target: CrawlTarget) -> Self {
        let start = target.start_url().clone();

        let mut pages = HashMap::new();
        pages.insert(start.clone(), PageState::Queued);

        Self {
            target,
            frontier: VecDeque::from([start]),
            pages,
            visited_count: 0,
            discovered: Vec::new(),
            discovered_urls: HashSet::new(),
        }
    }

    /// Gets the next URL to fetch
    ///
    /// This method:
    /// 1. Returns None once the page budget is spent
    /// 2. Pops the frontier head, returning None if the frontier is empty
    /// 3. Skips URLs that already reached a terminal state
    /// 4. Marks URLs failing the same-site or scope check as `Skipped`
    ///    (they do not count against the budget) and keeps searching
    pub fn next_url(&mut self) -> Option<Url> {
        loop {
            if self.budget_exhausted() {
                return None;
            }

            let url = self.frontier.pop_front()?;

            if self.pages.get(&url).is_some_and(|state| state.is_terminal()) {
                continue;
            }

            if !is_crawlable(&url, self.target.origin(), self.target.scope()) {
                tracing::debug!("Skipping out-of-scope page: {}", url);
                self.pages.insert(url, PageState::Skipped);
                continue;
            }

            return Some(url);
        }
    }

    /// Records the terminal state of a dequeued page
    ///
    /// Visited states (processed, non-HTML, failed) consume one unit of the
    /// page budget.
    pub fn complete(&mut self, url: &Url, state: PageState) {
        let previous = self.pages.insert(url.clone(), state);

        let already_visited = previous.is_some_and(|s| s.is_visited());
        if state.is_visited() && !already_visited {
            self.visited_count += 1;
        }
    }

    /// Merges the PDF links of one page into the discovery map
    ///
    /// The first page to reference a PDF URL keeps it: later sightings
    /// never overwrite anchor text or first-seen page.
    ///
    /// # Returns
    ///
    /// The number of PDF URLs that were new to the map
    pub fn record_pdfs(&mut self, page_url: &Url, pdf_links: Vec<PdfLink>) -> usize {
        let mut new_count = 0;

        for link in pdf_links {
            if !self.discovered_urls.insert(link.url.clone()) {
                continue;
            }
            self.discovered.push(DiscoveredPdf {
                url: link.url,
                anchor_text: link.anchor_text,
                first_seen: page_url.clone(),
            });
            new_count += 1;
        }

        new_count
    }

    /// Appends unseen, crawlable page links to the frontier in order
    ///
    /// # Returns
    ///
    /// The number of URLs actually enqueued
    pub fn enqueue_links(&mut self, links: impl IntoIterator<Item = Url>) -> usize {
        let mut enqueued = 0;

        for link in links {
            if self.pages.contains_key(&link) {
                continue;
            }
            if !is_crawlable(&link, self.target.origin(), self.target.scope()) {
                continue;
            }

            self.pages.insert(link.clone(), PageState::Queued);
            self.frontier.push_back(link);
            enqueued += 1;
        }

        enqueued
    }

    /// Returns true once the number of visited pages reached the budget
    pub fn budget_exhausted(&self) -> bool {
        self.visited_count >= self.target.max_pages()
    }

    pub fn visited_count(&self) -> u32 {
        self.visited_count
    }

    pub fn max_pages(&self) -> u32 {
        self.target.max_pages()
    }

    pub fn frontier_size(&self) -> usize {
        self.frontier.len()
    }

    /// Returns the recorded state of a page URL, if it was ever seen
    pub fn state_of(&self, url: &Url) -> Option<PageState> {
        self.pages.get(url).copied()
    }

    /// Counts pages per state
    pub fn count_by_state(&self, state: PageState) -> usize {
        self.pages.values().filter(|s| **s == state).count()
    }

    /// Discovered PDFs in discovery order
    pub fn discovered(&self) -> &[DiscoveredPdf] {
        &self.discovered
    }

    /// Takes the discovered PDFs out of the scheduler, leaving it empty
    pub fn take_discovered(&mut self) -> Vec<DiscoveredPdf> {
        self.discovered_urls.clear();
        std::mem::take(&mut self.discovered)
    }

    pub fn target(&self) -> &CrawlTarget {
        &self.target
    }
}
