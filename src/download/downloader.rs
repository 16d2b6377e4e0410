//! Streaming PDF downloads
//!
//! Bodies are written to disk chunk by chunk as they arrive, never held in
//! memory whole. A download that fails midway leaves no partial file.

use crate::digest::{digest_file, FileDigest};
use futures::StreamExt;
use reqwest::Client;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use url::Url;

/// Per-file download failure
///
/// These never abort a run: the crawler logs them and moves on to the
/// next PDF.
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("HTTP {status}")]
    HttpStatus { status: u16 },

    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("hashing task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl DownloadError {
    /// Returns true if the request ran into its timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Network(e) if e.is_timeout())
    }
}

/// A PDF stored on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedFile {
    /// Where the file was written
    pub path: PathBuf,

    /// Size and SHA-256 of the stored content
    pub digest: FileDigest,
}

/// Downloads `url` to `dest`, then hashes the stored file
///
/// Parent directories of `dest` are created as needed. The timeout covers
/// the whole request including the body. On any failure after `dest` was
/// created, the partial file is removed before the error is returned.
pub async fn download_file(
    client: &Client,
    url: &Url,
    dest: &Path,
    timeout: Duration,
) -> Result<DownloadedFile, DownloadError> {
    let response = client.get(url.clone()).timeout(timeout).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(DownloadError::HttpStatus {
            status: status.as_u16(),
        });
    }

    if let Some(parent) = dest.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let mut file = File::create(dest).await?;
    if let Err(e) = write_body(response, &mut file).await {
        drop(file);
        if let Err(remove_err) = tokio::fs::remove_file(dest).await {
            tracing::debug!(
                "Could not remove partial file {}: {}",
                dest.display(),
                remove_err
            );
        }
        return Err(e);
    }
    drop(file);

    let path = dest.to_path_buf();
    let digest = tokio::task::spawn_blocking(move || digest_file(&path)).await??;

    Ok(DownloadedFile {
        path: dest.to_path_buf(),
        digest,
    })
}

async fn write_body(response: reqwest::Response, file: &mut File) -> Result<(), DownloadError> {
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
    }

    file.flush().await?;
    Ok(())
}
