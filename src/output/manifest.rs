//! CSV manifest of downloaded PDFs
//!
//! One row per successfully downloaded PDF, in download order, under the
//! header `pdf_url,local_path,bytes,sha256,first_seen_page_url`.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Column names, in file order
pub const MANIFEST_HEADER: [&str; 5] = [
    "pdf_url",
    "local_path",
    "bytes",
    "sha256",
    "first_seen_page_url",
];

/// One manifest record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestRow {
    /// Normalized PDF URL
    pub pdf_url: String,

    /// Path of the stored file relative to the output folder, `/`-separated
    pub local_path: String,

    /// Size of the stored file
    pub bytes: u64,

    /// Lowercase hex SHA-256 of the stored file
    pub sha256: String,

    /// First page that referenced the PDF
    pub first_seen_page_url: String,
}

/// Writes the manifest, replacing any existing file
///
/// The header is always written, so a run without downloads still yields
/// a valid, header-only manifest.
pub fn write_manifest(path: &Path, rows: &[ManifestRow]) -> Result<(), csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;

    writer.write_record(MANIFEST_HEADER)?;
    for row in rows {
        writer.serialize(row)?;
    }

    writer.flush()?;
    Ok(())
}

/// Reads a manifest written by [`write_manifest`]
pub fn read_manifest(path: &Path) -> Result<Vec<ManifestRow>, csv::Error> {
    let mut reader = csv::Reader::from_path(path)?;
    reader.deserialize().collect()
}
