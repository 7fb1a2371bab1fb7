//! Sample IDs: SHA-256 of the scanned file unless Malice supplied one.

use ring::digest::{Context, SHA256};
use std::path::Path;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::error::{ClientError, Result};

/// Samples are hashed in chunks of this size.
const CHUNK: usize = 64 * 1024;

/// Lowercase hex SHA-256 of the sample at `path`.
pub async fn sha256_file(path: &Path) -> Result<String> {
    let read_err = |e| ClientError::io(path.display().to_string(), e);

    let file = tokio::fs::File::open(path).await.map_err(read_err)?;
    let mut reader = BufReader::with_capacity(CHUNK, file);
    let mut digest = Context::new(&SHA256);

    loop {
        let chunk = reader.fill_buf().await.map_err(read_err)?;
        if chunk.is_empty() {
            break;
        }
        digest.update(chunk);
        let read = chunk.len();
        reader.consume(read);
    }

    Ok(hex::encode(digest.finish()))
}

/// Pick the ID results are filed under.
///
/// An externally supplied ID (`MALICE_SCANID`) wins over the file hash.
pub async fn scan_id(supplied: Option<&str>, path: &Path) -> Result<String> {
    match supplied.map(str::trim).filter(|id| !id.is_empty()) {
        Some(id) => Ok(id.to_string()),
        None => sha256_file(path).await,
    }
}
