//! Checksum engine tying the builder, generate and verify together

use std::path::PathBuf;

use cardreg_fs::NormalizedPath;

use crate::config::ChecksumConfig;
use crate::error::Result;
use crate::manifest::{GenerateReport, ManifestBuilder, ManifestVerifier, VerifyReport, generate};

/// Entry point for both manifest modes against one repository root.
///
/// The root is fixed at construction; nothing here reads the process
/// working directory.
#[derive(Debug, Clone)]
pub struct ChecksumEngine {
    builder: ManifestBuilder,
    manifest: NormalizedPath,
}

impl ChecksumEngine {
    pub fn new(repo_root: impl Into<PathBuf>, config: &ChecksumConfig) -> Self {
        Self {
            builder: ManifestBuilder::from_config(repo_root, config),
            manifest: config.manifest_path(),
        }
    }

    pub fn builder(&self) -> &ManifestBuilder {
        &self.builder
    }

    /// Repository-relative manifest location
    pub fn manifest_path(&self) -> &NormalizedPath {
        &self.manifest
    }

    /// Recompute and overwrite the persisted manifest.
    pub fn generate(&self) -> Result<GenerateReport> {
        generate(&self.builder, &self.manifest)
    }

    /// Compare the persisted manifest with the current state, read-only.
    pub fn verify(&self) -> Result<VerifyReport> {
        ManifestVerifier::new(&self.builder, self.manifest.clone()).verify()
    }
}
