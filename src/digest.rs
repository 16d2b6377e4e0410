//! Content hashing shared by the downloader and the dedupe utility
//!
//! Both sides hash with the same routine so a manifest's `sha256` column can
//! be compared directly against dedupe results.

use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Size of each read while hashing (1 MiB)
pub const HASH_CHUNK_SIZE: usize = 1024 * 1024;

/// Size and SHA-256 digest of a file's full content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDigest {
    /// Number of bytes hashed
    pub bytes: u64,

    /// Lowercase hex-encoded SHA-256
    pub sha256: String,
}

/// Hashes a file in fixed-size chunks without loading it whole
///
/// # Example
///
/// ```no_run
/// use pdf_harvest::digest::digest_file;
/// use std::path::Path;
///
/// let digest = digest_file(Path::new("report.pdf")).unwrap();
/// println!("{} bytes, sha256 {}", digest.bytes, digest.sha256);
/// ```
pub fn digest_file(path: &Path) -> io::Result<FileDigest> {
    let file = File::open(path)?;
    digest_reader(file)
}

/// Hashes everything readable from `reader` in fixed-size chunks
pub fn digest_reader<R: Read>(mut reader: R) -> io::Result<FileDigest> {
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; HASH_CHUNK_SIZE];
    let mut bytes = 0u64;

    loop {
        let read = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buffer[..read]);
        bytes += read as u64;
    }

    Ok(FileDigest {
        bytes,
        sha256: hex::encode(hasher.finalize()),
    })
}

/// Convenience wrapper returning only the hex digest
pub fn sha256_file(path: &Path) -> io::Result<String> {
    digest_file(path).map(|digest| digest.sha256)
}
