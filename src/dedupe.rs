//! Content-hash deduplication of a PDF folder
//!
//! Every `.pdf` file under the input folder is hashed. The first file seen
//! for each distinct hash is copied to the output folder, every later file
//! with the same hash to a duplicates subfolder. "First" follows the walk
//! order, which is sorted by file name within each directory: it is a
//! property of the tree layout, not of file content.

use crate::digest::digest_file;
use crate::HarvestError;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Default name of the duplicates subfolder
pub const DEFAULT_DUPES_DIR: &str = "DUPES";

/// Counts from one dedupe pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DedupeReport {
    /// PDF files found
    pub scanned: usize,

    /// Files copied to the output folder
    pub unique: usize,

    /// Files copied to the duplicates folder
    pub duplicates: usize,

    /// Files or directories that could not be read or copied
    pub skipped: usize,
}

/// Returns true if the path has a `.pdf` extension in any case
pub fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

/// First path in `dir` for `file_name` that does not exist yet
///
/// A taken `name.pdf` becomes `name (2).pdf`, then `name (3).pdf`, ...
pub fn available_path(dir: &Path, file_name: &str) -> PathBuf {
    let candidate = dir.join(file_name);
    if !candidate.exists() {
        return candidate;
    }

    let as_path = Path::new(file_name);
    let stem = as_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_name.to_string());
    let ext = as_path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    let mut i = 2;
    loop {
        let candidate = dir.join(format!("{} ({}){}", stem, i, ext));
        if !candidate.exists() {
            return candidate;
        }
        i += 1;
    }
}

/// Splits the PDFs under `input` into unique files and duplicates
///
/// Both `output` and `output/{dupes_name}` are created if missing. When the
/// output folder lies inside the input folder it is left out of the scan,
/// as is the duplicates folder. Unreadable files are logged and counted as
/// skipped.
///
/// # Example
///
/// ```no_run
/// use pdf_harvest::dedupe::{dedupe_folder, DEFAULT_DUPES_DIR};
/// use std::path::Path;
///
/// let report = dedupe_folder(Path::new("pdfs"), Path::new("pdfs_unique"), DEFAULT_DUPES_DIR).unwrap();
/// println!("{} unique, {} duplicates", report.unique, report.duplicates);
/// ```
pub fn dedupe_folder(
    input: &Path,
    output: &Path,
    dupes_name: &str,
) -> Result<DedupeReport, HarvestError> {
    if dupes_name.is_empty()
        || dupes_name.contains(&['/', '\\'][..])
        || dupes_name == "."
        || dupes_name == ".."
    {
        return Err(HarvestError::InvalidInput(format!(
            "duplicates folder must be a plain folder name, got '{}'",
            dupes_name
        )));
    }

    let root = input.canonicalize()?;
    if !root.is_dir() {
        return Err(HarvestError::InvalidInput(format!(
            "{} is not a directory",
            input.display()
        )));
    }

    let dupes_dir = output.join(dupes_name);
    fs::create_dir_all(&dupes_dir)?;

    let out_canonical = output.canonicalize()?;
    let dupes_canonical = dupes_dir.canonicalize()?;

    let mut excluded = vec![dupes_canonical];
    if out_canonical != root && out_canonical.starts_with(&root) {
        excluded.push(out_canonical);
    }

    tracing::info!("Scanning {} for PDFs", root.display());

    let mut report = DedupeReport::default();
    let mut seen: HashMap<String, PathBuf> = HashMap::new();

    let walker = WalkDir::new(&root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !excluded.iter().any(|dir| e.path().starts_with(dir)));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Skipping unreadable entry: {}", e);
                report.skipped += 1;
                continue;
            }
        };

        let path = entry.path();
        if !entry.file_type().is_file() || !has_pdf_extension(path) {
            continue;
        }
        report.scanned += 1;

        let digest = match digest_file(path) {
            Ok(digest) => digest,
            Err(e) => {
                tracing::warn!("Skipping {}: {}", path.display(), e);
                report.skipped += 1;
                continue;
            }
        };

        let original = seen.get(&digest.sha256).cloned();
        let target_dir = if original.is_some() {
            dupes_dir.as_path()
        } else {
            output
        };

        let file_name = entry.file_name().to_string_lossy();
        let dest = available_path(target_dir, &file_name);
        if let Err(e) = fs::copy(path, &dest) {
            tracing::warn!(
                "Failed to copy {} to {}: {}",
                path.display(),
                dest.display(),
                e
            );
            report.skipped += 1;
            continue;
        }

        match original {
            Some(original) => {
                tracing::debug!(
                    "Duplicate: {} has the same content as {}",
                    path.display(),
                    original.display()
                );
                report.duplicates += 1;
            }
            None => {
                seen.insert(digest.sha256, path.to_path_buf());
                report.unique += 1;
            }
        }
    }

    tracing::info!(
        "Dedupe finished: {} scanned, {} unique, {} duplicates, {} skipped",
        report.scanned,
        report.unique,
        report.duplicates,
        report.skipped
    );

    Ok(report)
}
