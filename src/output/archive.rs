//! Zip archive of an output folder

use std::fs::File;
use std::io;
use std::path::Path;
use walkdir::WalkDir;
use zip::result::ZipResult;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Bundles every regular file under `source_dir` into a Deflate zip
///
/// Entries are named by their path relative to `source_dir` with `/`
/// separators and are added in file-name order. The archive itself is
/// skipped when it lies inside `source_dir`. An existing archive at
/// `archive_path` is replaced.
///
/// # Returns
///
/// The number of entries written
pub fn create_archive(source_dir: &Path, archive_path: &Path) -> ZipResult<usize> {
    let file = File::create(archive_path)?;
    let mut zip = ZipWriter::new(file);
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    // Compare against the created file so relative and absolute spellings match
    let archive_canonical = archive_path.canonicalize()?;
    let mut entries = 0;

    for entry in WalkDir::new(source_dir).sort_by_file_name() {
        let entry = entry.map_err(io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        if path.canonicalize().ok().as_deref() == Some(archive_canonical.as_path()) {
            continue;
        }

        let name = entry_name(source_dir, path);
        zip.start_file(name, options)?;
        let mut source = File::open(path)?;
        io::copy(&mut source, &mut zip)?;
        entries += 1;
    }

    zip.finish()?;
    Ok(entries)
}

/// Forward-slash path of `path` relative to `root`
pub fn entry_name(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
