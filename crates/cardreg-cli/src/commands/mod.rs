//! Command implementations for cardreg-cli

pub mod cards;
pub mod checksums;
pub mod validate;

use std::path::{Path, PathBuf};

use cardreg_core::RegistryConfig;

use crate::error::Result;

pub use cards::{run_mirror, run_reorder};
pub use checksums::{run_checksums, run_sidecars};
pub use validate::run_validate;

/// Canonicalize the repository root and load its configuration.
pub fn open_registry(path: &Path) -> Result<(PathBuf, RegistryConfig)> {
    let root = cardreg_fs::resolve_root(path)?;
    let config = RegistryConfig::load(&root)?;
    tracing::debug!(root = %root.display(), "opened registry");
    Ok((root, config))
}
