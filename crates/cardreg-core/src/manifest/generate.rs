//! Generate mode: recompute and unconditionally overwrite the manifest.

use cardreg_fs::{NormalizedPath, io};
use tracing::info;

use super::ManifestBuilder;
use crate::error::Result;

/// Outcome of a generate run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateReport {
    /// Number of manifest entries written
    pub entries: usize,
    /// Repository-relative manifest location
    pub manifest: NormalizedPath,
}

/// Build the manifest and atomically replace the persisted copy.
///
/// The build completes before anything is written, so a failed run leaves
/// the previous manifest untouched.
pub fn generate(builder: &ManifestBuilder, manifest: &NormalizedPath) -> Result<GenerateReport> {
    let built = builder.build()?;
    let target = NormalizedPath::new(builder.repo_root().join(manifest.to_native()));
    io::write_text(&target, &built.render())?;
    info!(manifest = %manifest, entries = built.len(), "wrote checksum manifest");
    Ok(GenerateReport {
        entries: built.len(),
        manifest: manifest.clone(),
    })
}
