//! Local filename derivation for downloaded PDFs
//!
//! Names combine the link's anchor text with the URL's final path segment
//! so files stay recognizable on disk, e.g.
//! `Annual Tariff Order - tariff_2024.pdf`.

use percent_encoding::percent_decode_str;
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;
use url::Url;

/// Maximum length of a sanitized name, in characters
pub const MAX_NAME_CHARS: usize = 160;

/// Anchor texts that say nothing about the document and are dropped
pub const GENERIC_LABELS: [&str; 5] = ["download", "pdf", "click here", "view", "open"];

const PDF_EXTENSION: &str = ".pdf";

fn illegal_chars() -> &'static Regex {
    static ILLEGAL_RE: OnceLock<Regex> = OnceLock::new();
    ILLEGAL_RE.get_or_init(|| Regex::new(r#"[\\/:*?"<>|]+"#).expect("illegal-char pattern is valid"))
}

/// Makes a string safe to use as a file name
///
/// Runs of filesystem-illegal characters become one underscore, whitespace
/// (including newlines) collapses to single spaces, and the result is
/// trimmed and cut to [`MAX_NAME_CHARS`] characters.
///
/// ```
/// use pdf_harvest::download::sanitize_filename;
///
/// assert_eq!(sanitize_filename("  Order: 12/2024 \n final "), "Order_ 12_2024 final");
/// ```
pub fn sanitize_filename(name: &str) -> String {
    let replaced = illegal_chars().replace_all(name, "_");
    let collapsed = replaced.split_whitespace().collect::<Vec<_>>().join(" ");
    truncate_chars(&collapsed, MAX_NAME_CHARS)
}

fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].trim_end().to_string(),
        None => s.to_string(),
    }
}

fn is_generic_label(text: &str) -> bool {
    let lowered = text.to_lowercase();
    GENERIC_LABELS.contains(&lowered.as_str())
}

fn has_pdf_extension(name: &str) -> bool {
    name.to_lowercase().ends_with(PDF_EXTENSION)
}

/// Splits a name ending in `.pdf` (any case) into stem and extension
fn split_extension(name: &str) -> (&str, &str) {
    if has_pdf_extension(name) && name.is_char_boundary(name.len() - PDF_EXTENSION.len()) {
        name.split_at(name.len() - PDF_EXTENSION.len())
    } else {
        (name, "")
    }
}

/// Builds the preferred file name for a PDF, before collision handling
///
/// The base name is the URL's final path segment, percent-decoded, or `file_{ordinal}.pdf`
/// when the path has none. Anchor text is prepended as
/// `"{anchor} - {base}"` unless it is empty or a generic label. The name
/// always ends in `.pdf`; when too long, the stem is shortened so the
/// extension survives.
///
/// ```
/// use pdf_harvest::download::preferred_filename;
/// use url::Url;
///
/// let url = Url::parse("https://example.com/forms/Tariff_Order.pdf").unwrap();
/// assert_eq!(preferred_filename(&url, "Download", 1), "Tariff_Order.pdf");
/// assert_eq!(preferred_filename(&url, "Tariff 2024", 1), "Tariff 2024 - Tariff_Order.pdf");
/// ```
pub fn preferred_filename(pdf_url: &Url, anchor_text: &str, ordinal: usize) -> String {
    let base = pdf_url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|segment| !segment.is_empty())
        .map(|segment| sanitize_filename(&percent_decode_str(segment).decode_utf8_lossy()))
        .filter(|segment| !segment.is_empty())
        .unwrap_or_else(|| format!("file_{}.pdf", ordinal));

    let text = sanitize_filename(anchor_text);
    let mut filename = if text.is_empty() || is_generic_label(&text) {
        base
    } else {
        format!("{} - {}", text, base)
    };

    if !has_pdf_extension(&filename) {
        filename.push_str(PDF_EXTENSION);
    }

    fit_length(filename)
}

/// Shortens the stem so the whole name stays within [`MAX_NAME_CHARS`]
fn fit_length(name: String) -> String {
    if name.chars().count() <= MAX_NAME_CHARS {
        return name;
    }
    let (stem, ext) = split_extension(&name);
    let budget = MAX_NAME_CHARS - ext.chars().count();
    format!("{}{}", truncate_chars(stem, budget), ext)
}

/// Assigns collision-free file names within one output directory
///
/// Names are compared case-insensitively. A taken name gets a ` (2)`,
/// ` (3)`, ... suffix before its extension. A name stays reserved even if
/// the download using it later fails.
#[derive(Debug, Default)]
pub struct FilenameResolver {
    used: HashSet<String>,
}

impl FilenameResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a name as taken without resolving anything for it
    pub fn reserve(&mut self, name: &str) {
        self.used.insert(name.to_lowercase());
    }

    /// Returns true if the name (compared case-insensitively) is taken
    pub fn is_taken(&self, name: &str) -> bool {
        self.used.contains(&name.to_lowercase())
    }

    /// Resolves and reserves the file name for one PDF
    ///
    /// `ordinal` is the 1-based position of the PDF in download order.
    pub fn resolve(&mut self, pdf_url: &Url, anchor_text: &str, ordinal: usize) -> String {
        let preferred = preferred_filename(pdf_url, anchor_text, ordinal);
        let name = self.unique(preferred);
        self.reserve(&name);
        name
    }

    fn unique(&self, preferred: String) -> String {
        if !self.is_taken(&preferred) {
            return preferred;
        }

        let (stem, ext) = split_extension(&preferred);
        let mut n = 2usize;
        loop {
            let suffix = format!(" ({})", n);
            let budget = MAX_NAME_CHARS.saturating_sub(suffix.len() + ext.len());
            let candidate = format!("{}{}{}", truncate_chars(stem, budget), suffix, ext);
            if !self.is_taken(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }

    /// Number of reserved names
    pub fn len(&self) -> usize {
        self.used.len()
    }

    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }
}
