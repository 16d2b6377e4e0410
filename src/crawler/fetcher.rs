//! HTTP fetcher implementation
//!
//! This module handles page requests for the crawler, including:
//! - Building the run's HTTP client with the identifying user agent string
//! - GET requests with a per-request timeout
//! - Content-Type gating (only HTML bodies are read)
//! - Error classification into a tagged [`FetchResult`]
//!
//! No request is retried. Every outcome is terminal for the URL it was
//! issued for.

use crate::config::UserAgentConfig;
use crate::state::PageState;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Result of a page fetch
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched an HTML page
    Success {
        /// Final URL after redirects
        final_url: Url,
        /// HTTP status code
        status_code: u16,
        /// Content-Type header value
        content_type: String,
        /// Page body content
        body: String,
    },

    /// Page is not HTML (Content-Type mismatch); the body is never read
    ContentMismatch {
        /// HTTP status code
        status_code: u16,
        /// The actual Content-Type received
        content_type: String,
    },

    /// Server answered with a non-success status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, timeout, body read failure, etc.)
    NetworkError {
        /// Error description
        error: String,
        /// Whether the request ran into the timeout
        timed_out: bool,
    },
}

impl FetchResult {
    /// Maps the fetch outcome to the terminal state of the page
    pub fn page_state(&self) -> PageState {
        match self {
            Self::Success { .. } => PageState::Processed,
            Self::ContentMismatch { .. } => PageState::NonHtml,
            Self::HttpError { .. } | Self::NetworkError { .. } => PageState::Failed,
        }
    }

    /// Short human-readable description of a failed fetch
    pub fn failure_reason(&self) -> Option<String> {
        match self {
            Self::HttpError { status_code } => Some(format!("HTTP {}", status_code)),
            Self::NetworkError { error, .. } => Some(error.clone()),
            _ => None,
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// One client is built per run and shared by the page fetcher and the
/// download manager. Per-request timeouts are applied at call sites since
/// pages and downloads use different limits.
///
/// # Example
///
/// ```no_run
/// use pdf_harvest::config::UserAgentConfig;
/// use pdf_harvest::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent_string())
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Returns true if a Content-Type header value declares HTML
pub fn is_html(content_type: &str) -> bool {
    content_type.to_ascii_lowercase().contains("text/html")
}

/// Fetches one page
///
/// # Request Flow
///
/// 1. Send GET request (redirects followed by the client policy)
/// 2. Non-success status → `HttpError`
/// 3. Content-Type without `text/html` → `ContentMismatch`
/// 4. Read the body as text → `Success`
///
/// | Condition | Result |
/// |-----------|--------|
/// | HTTP 2xx + text/html | Success |
/// | HTTP 2xx + other type | ContentMismatch |
/// | HTTP 4xx / 5xx | HttpError |
/// | Timeout | NetworkError (timed_out) |
/// | Connection refused, TLS error, body read error | NetworkError |
pub async fn fetch_page(client: &Client, url: &Url, timeout: Duration) -> FetchResult {
    let response = match client.get(url.clone()).timeout(timeout).send().await {
        Ok(response) => response,
        Err(e) => return classify_error(e),
    };

    let status = response.status();
    if !status.is_success() {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    let final_url = response.url().clone();
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if !is_html(&content_type) {
        return FetchResult::ContentMismatch {
            status_code: status.as_u16(),
            content_type,
        };
    }

    match response.text().await {
        Ok(body) => FetchResult::Success {
            final_url,
            status_code: status.as_u16(),
            content_type,
            body,
        },
        Err(e) => classify_error(e),
    }
}

/// Classifies a transport error
fn classify_error(e: reqwest::Error) -> FetchResult {
    if e.is_timeout() {
        FetchResult::NetworkError {
            error: "Request timeout".to_string(),
            timed_out: true,
        }
    } else if e.is_connect() {
        FetchResult::NetworkError {
            error: format!("Connection failed: {}", e),
            timed_out: false,
        }
    } else {
        FetchResult::NetworkError {
            error: e.to_string(),
            timed_out: false,
        }
    }
}
