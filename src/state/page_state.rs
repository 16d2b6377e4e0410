/// Page state definitions for tracking crawl progress
///
/// A page URL the scheduler has never seen is implicitly unvisited; once it
/// enters the frontier it is `Queued`, and after dequeue it settles in exactly
/// one terminal state.
use std::fmt;

/// Represents the current state of a page in the crawl process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageState {
    // ===== Active States =====
    /// Page is in the frontier waiting to be fetched
    Queued,

    // ===== Terminal Visited States =====
    /// Page was fetched as HTML and its links were extracted
    Processed,

    /// Page was fetched but its Content-Type is not HTML (leaf, no links)
    NonHtml,

    /// Page fetch failed (timeout, connection error, non-success status)
    Failed,

    // ===== Terminal Skip States =====
    /// Page was dequeued but failed the same-site or scope re-check
    Skipped,
}

impl PageState {
    /// Returns true if this is a terminal state (no further processing needed)
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Queued)
    }

    /// Returns true if a fetch was attempted; these count against the page budget
    pub fn is_visited(&self) -> bool {
        matches!(self, Self::Processed | Self::NonHtml | Self::Failed)
    }

    /// Returns true if this represents a successful HTML fetch
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Processed)
    }

    /// Returns true if this represents an error state
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failed)
    }

    /// Returns a stable lowercase label for logs and reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Queued => "queued",
            Self::Processed => "processed",
            Self::NonHtml => "non_html",
            Self::Failed => "failed",
            Self::Skipped => "skipped",
        }
    }

    /// Returns all possible page states
    pub fn all_states() -> Vec<Self> {
        vec![
            Self::Queued,
            Self::Processed,
            Self::NonHtml,
            Self::Failed,
            Self::Skipped,
        ]
    }
}

impl fmt::Display for PageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
