//! PDF to plain-text conversion for a folder of PDFs
//!
//! Each `{stem}.pdf` becomes `{stem}.txt` in the output folder. Pages are
//! introduced by a `--- Page N ---` marker, whitespace is tidied, and
//! documents with almost no recoverable text are flagged with a marker
//! line. A PDF that cannot be read produces an `[ERROR] ...` file instead
//! of stopping the batch.

use crate::dedupe::has_pdf_extension;
use crate::HarvestError;
use regex::Regex;
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;
use walkdir::WalkDir;

/// First line of the output for documents with too little text
pub const NO_TEXT_MARKER: &str = "[NO_TEXT_EXTRACTED]";

/// Documents whose cleaned text is shorter than this get [`NO_TEXT_MARKER`]
pub const MIN_TEXT_CHARS: usize = 200;

/// Per-file extraction failure
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to read PDF: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to extract text: {0}")]
    Pdf(String),

    #[error("PDF parser panicked: {0}")]
    Panicked(String),
}

/// Counts from one extraction pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractReport {
    /// PDF files found
    pub processed: usize,

    /// Outputs with enough text
    pub with_text: usize,

    /// Outputs flagged with [`NO_TEXT_MARKER`]
    pub no_text: usize,

    /// Outputs holding an `[ERROR]` line
    pub failed: usize,
}

fn horizontal_space() -> &'static Regex {
    static SPACE_RE: OnceLock<Regex> = OnceLock::new();
    SPACE_RE.get_or_init(|| Regex::new(r"[ \t]+").expect("space pattern is valid"))
}

fn blank_lines() -> &'static Regex {
    static BLANK_RE: OnceLock<Regex> = OnceLock::new();
    BLANK_RE.get_or_init(|| Regex::new(r"\n{3,}").expect("blank-line pattern is valid"))
}

/// Extracts the text of every page of a PDF
///
/// Panics inside the PDF parser are caught and reported as
/// [`ExtractError::Panicked`].
pub fn extract_pdf_pages(path: &Path) -> Result<Vec<String>, ExtractError> {
    let bytes = fs::read(path)?;

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(&bytes)
    }));

    match result {
        Ok(Ok(pages)) => Ok(pages),
        Ok(Err(e)) => Err(ExtractError::Pdf(e.to_string())),
        Err(payload) => Err(ExtractError::Panicked(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Tidies extracted text
///
/// NUL characters become spaces, runs of spaces and tabs collapse to one
/// space, three or more newlines collapse to one blank line, and the result
/// is trimmed.
///
/// ```
/// use pdf_harvest::extract::clean_text;
///
/// assert_eq!(clean_text("  a\t\t b\0c\n\n\n\nd  "), "a b c\n\nd");
/// ```
pub fn clean_text(text: &str) -> String {
    let text = text.replace('\0', " ");
    let text = horizontal_space().replace_all(&text, " ");
    let text = blank_lines().replace_all(&text, "\n\n");
    text.trim().to_string()
}

/// Joins page texts with page markers and cleans the result
///
/// Pages without any visible text are left out, markers included; page
/// numbers stay 1-based positions in the document.
pub fn render_pages(pages: &[String]) -> String {
    let chunks: Vec<String> = pages
        .iter()
        .enumerate()
        .filter(|(_, page)| !page.trim().is_empty())
        .map(|(i, page)| format!("\n--- Page {} ---\n{}", i + 1, page))
        .collect();

    clean_text(&chunks.join("\n"))
}

/// Adds [`NO_TEXT_MARKER`] in front of implausibly short text
pub fn flag_short_text(text: String) -> String {
    if text.chars().count() < MIN_TEXT_CHARS {
        format!("{}\n{}", NO_TEXT_MARKER, text)
    } else {
        text
    }
}

/// Produces the full text-file content for one PDF
///
/// Never fails: extraction errors become an `[ERROR] {message}` line.
pub fn convert_pdf(path: &Path) -> String {
    match extract_pdf_pages(path) {
        Ok(pages) => flag_short_text(render_pages(&pages)),
        Err(e) => format!("[ERROR] {}", e),
    }
}

/// Lists the PDFs of a folder in file-name order
///
/// Without `recursive` only the folder's own entries are considered.
pub fn list_pdfs(input: &Path, recursive: bool) -> Result<Vec<PathBuf>, HarvestError> {
    let mut walker = WalkDir::new(input).min_depth(1).sort_by_file_name();
    if !recursive {
        walker = walker.max_depth(1);
    }

    let mut pdfs = Vec::new();
    for entry in walker {
        let entry = entry?;
        if entry.file_type().is_file() && has_pdf_extension(entry.path()) {
            pdfs.push(entry.into_path());
        }
    }
    Ok(pdfs)
}

/// Output path for a PDF: `{output}/{stem}.txt`
pub fn text_path_for(output: &Path, pdf: &Path) -> PathBuf {
    let stem = pdf
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    output.join(format!("{}.txt", stem))
}

/// Converts every PDF of `input` into a text file under `output`
///
/// In recursive mode PDFs with the same stem in different subfolders map
/// to the same output file; the one later in walk order wins.
pub fn extract_folder(
    input: &Path,
    output: &Path,
    recursive: bool,
) -> Result<ExtractReport, HarvestError> {
    if !input.is_dir() {
        return Err(HarvestError::InvalidInput(format!(
            "{} is not a directory",
            input.display()
        )));
    }
    fs::create_dir_all(output)?;

    let pdfs = list_pdfs(input, recursive)?;
    tracing::info!("Extracting text from {} PDFs", pdfs.len());

    let mut report = ExtractReport::default();
    for (idx, pdf) in pdfs.iter().enumerate() {
        let text = convert_pdf(pdf);
        let out_path = text_path_for(output, pdf);

        if text.starts_with("[ERROR]") {
            tracing::warn!("{}: {}", pdf.display(), text);
            report.failed += 1;
        } else if text.starts_with(NO_TEXT_MARKER) {
            tracing::debug!("{}: no usable text", pdf.display());
            report.no_text += 1;
        } else {
            report.with_text += 1;
        }

        fs::write(&out_path, text)?;
        report.processed += 1;
        tracing::debug!("[{}/{}] {}", idx + 1, pdfs.len(), out_path.display());
    }

    tracing::info!(
        "Text written to {}: {} with text, {} without, {} failed",
        output.display(),
        report.with_text,
        report.no_text,
        report.failed
    );

    Ok(report)
}
