//! HTML parser for extracting page links and PDF links
//!
//! This module handles parsing HTML content to extract:
//! - Links to follow (from `<a href>` elements)
//! - PDF links together with their anchor text
//!
//! Both lists are deduplicated within the page with the first occurrence
//! winning, so order of appearance is preserved.

use crate::url::strip_fragment;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use std::sync::OnceLock;
use url::Url;

/// A PDF reference found on a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfLink {
    /// Absolute, fragment-free PDF URL
    pub url: Url,

    /// Visible text of the referencing element, whitespace-collapsed (may be empty)
    pub anchor_text: String,
}

/// Extracted links from an HTML page
#[derive(Debug, Clone, Default)]
pub struct ParsedPage {
    /// Non-PDF links (absolute URLs), candidates for the frontier
    pub page_links: Vec<Url>,

    /// PDF links with anchor text
    pub pdf_links: Vec<PdfLink>,
}

fn pdf_pattern() -> &'static Regex {
    static PDF_RE: OnceLock<Regex> = OnceLock::new();
    PDF_RE.get_or_init(|| Regex::new(r"(?i)\.pdf(\?|$)").expect("PDF pattern is valid"))
}

/// Returns true if the URL points at a PDF: its text ends in `.pdf`
/// (case-insensitive), optionally followed by a query string
///
/// ```
/// use pdf_harvest::crawler::is_pdf_url;
/// use url::Url;
///
/// assert!(is_pdf_url(&Url::parse("https://example.com/a/Report.PDF").unwrap()));
/// assert!(is_pdf_url(&Url::parse("https://example.com/a/report.pdf?v=2").unwrap()));
/// assert!(!is_pdf_url(&Url::parse("https://example.com/a/report.pdf.html").unwrap()));
/// ```
pub fn is_pdf_url(url: &Url) -> bool {
    pdf_pattern().is_match(url.as_str())
}

/// Parses HTML content and classifies every hyperlink
///
/// # Link Extraction Rules
///
/// **Include:**
/// - Every `<a href="...">` element, including ones carrying `download`
///   or `rel="nofollow"`
///
/// **Exclude:**
/// - Empty and fragment-only hrefs
/// - `javascript:`, `mailto:`, `tel:` links and data URIs
/// - Anything that does not resolve to an http(s) URL
///
/// Hrefs are resolved against `base_url` (the page's final URL after
/// redirects) and the fragment is dropped before classification.
///
/// # Example
///
/// ```
/// use pdf_harvest::crawler::parse_html;
/// use url::Url;
///
/// let html = r#"<a href="/docs/next">Next</a> <a href="files/a.pdf"> Annual  report </a>"#;
/// let base_url = Url::parse("https://example.com/docs/").unwrap();
/// let parsed = parse_html(html, &base_url).unwrap();
///
/// assert_eq!(parsed.page_links[0].as_str(), "https://example.com/docs/next");
/// assert_eq!(parsed.pdf_links[0].url.as_str(), "https://example.com/docs/files/a.pdf");
/// assert_eq!(parsed.pdf_links[0].anchor_text, "Annual report");
/// ```
pub fn parse_html(html: &str, base_url: &Url) -> Result<ParsedPage, String> {
    let document = Html::parse_document(html);
    let selector =
        Selector::parse("a[href]").map_err(|e| format!("Invalid link selector: {:?}", e))?;

    let mut parsed = ParsedPage::default();
    let mut seen_pages = HashSet::new();
    let mut seen_pdfs = HashSet::new();

    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let Some(url) = resolve_link(href, base_url) else {
            continue;
        };

        if is_pdf_url(&url) {
            if seen_pdfs.insert(url.clone()) {
                parsed.pdf_links.push(PdfLink {
                    url,
                    anchor_text: anchor_text(&element),
                });
            }
        } else if seen_pages.insert(url.clone()) {
            parsed.page_links.push(url);
        }
    }

    Ok(parsed)
}

/// Convenience function returning both lists as a tuple
///
/// Unparseable input yields two empty lists.
pub fn extract_links(html: &str, page_url: &Url) -> (Vec<Url>, Vec<PdfLink>) {
    parse_html(html, page_url)
        .map(|parsed| (parsed.page_links, parsed.pdf_links))
        .unwrap_or_default()
}

/// Collects the visible text of an element with runs of whitespace collapsed
fn anchor_text(element: &ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Resolves a link href to an absolute, fragment-free URL
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lowered = href.to_ascii_lowercase();
    if ["javascript:", "mailto:", "tel:", "data:"]
        .iter()
        .any(|scheme| lowered.starts_with(scheme))
    {
        return None;
    }

    let absolute_url = base_url.join(href).ok()?;
    match absolute_url.scheme() {
        "http" | "https" => Some(strip_fragment(absolute_url)),
        _ => None,
    }
}
