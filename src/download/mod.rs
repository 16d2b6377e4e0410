//! Download module for discovered PDFs
//!
//! # Components
//!
//! - `FilenameResolver`: Derives readable, collision-free local file names
//! - `download_file`: Streams one PDF to disk and hashes the stored bytes

mod downloader;
mod filename;

pub use downloader::{download_file, DownloadError, DownloadedFile};
pub use filename::{
    preferred_filename, sanitize_filename, FilenameResolver, GENERIC_LABELS, MAX_NAME_CHARS,
};
