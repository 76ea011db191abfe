//! SHA-256 digest primitive
//!
//! Every checksum in the registry is a lowercase hex SHA-256 over raw bytes.
//! The manifest stores bare hex; sidecar files may carry a `sha256:` prefix,
//! which [`parse_checksum`] strips.

use sha2::{Digest, Sha256};
use std::path::Path;

use crate::{Error, Result};

/// Prefix accepted on sidecar checksum files
pub const PREFIX: &str = "sha256:";

/// Compute the lowercase hex SHA-256 of raw bytes.
pub fn compute_content_checksum(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    format!("{:x}", hasher.finalize())
}

/// Compute the lowercase hex SHA-256 of a file's bytes, exactly as stored.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read.
pub fn compute_file_checksum(path: &Path) -> Result<String> {
    let content = std::fs::read(path).map_err(|e| Error::io(path, e))?;
    Ok(compute_content_checksum(&content))
}

/// Normalize a stored checksum: trims whitespace and drops a `sha256:` prefix.
///
/// Returns `None` for blank input.
pub fn parse_checksum(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    let hex = trimmed.strip_prefix(PREFIX).unwrap_or(trimmed);
    if hex.is_empty() { None } else { Some(hex) }
}
