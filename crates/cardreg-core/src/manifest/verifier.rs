//! Verify mode: read-only, byte-exact comparison against the persisted manifest.

use cardreg_fs::{NormalizedPath, io};
use similar::TextDiff;
use tracing::{debug, warn};

use super::{ManifestBuilder, parse_lenient};
use crate::error::Result;

/// What differs between the persisted and the freshly built manifest
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestDrift {
    /// Paths present now but not in the persisted manifest
    pub added: Vec<String>,
    /// Paths listed in the persisted manifest that are gone or excluded
    pub removed: Vec<String>,
    /// Paths whose digest changed
    pub changed: Vec<String>,
    /// Persisted lines that are not `digest  path`
    pub malformed: Vec<String>,
    /// Unified line diff, persisted → current
    pub diff: String,
}

impl ManifestDrift {
    fn compute(persisted: &str, current: &str) -> Self {
        let (old, malformed) = parse_lenient(persisted);
        let (new, _) = parse_lenient(current);
        let old_map = old.digests_by_path();
        let new_map = new.digests_by_path();

        let added = new_map
            .keys()
            .filter(|path| !old_map.contains_key(*path))
            .map(|path| path.to_string())
            .collect();
        let removed = old_map
            .keys()
            .filter(|path| !new_map.contains_key(*path))
            .map(|path| path.to_string())
            .collect();
        let changed = new_map
            .iter()
            .filter(|(path, digest)| old_map.get(*path).is_some_and(|old| old != *digest))
            .map(|(path, _)| path.to_string())
            .collect();

        let diff = TextDiff::from_lines(persisted, current)
            .unified_diff()
            .context_radius(1)
            .header("persisted", "current")
            .to_string();

        Self {
            added,
            removed,
            changed,
            malformed,
            diff,
        }
    }

    /// True when no entry differs and only layout (ordering, blank lines,
    /// trailing newline) keeps the texts apart.
    pub fn is_formatting_only(&self) -> bool {
        self.added.is_empty()
            && self.removed.is_empty()
            && self.changed.is_empty()
            && self.malformed.is_empty()
    }
}

/// Result of comparing persisted and current manifests
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyOutcome {
    /// Persisted text is byte-identical to the current build
    Match,
    /// No persisted manifest exists
    Absent,
    /// Persisted text differs from the current build
    Mismatch(ManifestDrift),
}

/// Full verify result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyReport {
    pub outcome: VerifyOutcome,
    /// Repository-relative manifest location
    pub manifest: NormalizedPath,
    /// Entries in the freshly built manifest
    pub entries: usize,
}

impl VerifyReport {
    pub fn is_match(&self) -> bool {
        self.outcome == VerifyOutcome::Match
    }
}

/// Compares the persisted manifest with a fresh in-memory build.
///
/// Never writes to the filesystem.
#[derive(Debug)]
pub struct ManifestVerifier<'a> {
    builder: &'a ManifestBuilder,
    manifest: NormalizedPath,
}

impl<'a> ManifestVerifier<'a> {
    pub fn new(builder: &'a ManifestBuilder, manifest: NormalizedPath) -> Self {
        Self { builder, manifest }
    }

    pub fn verify(&self) -> Result<VerifyReport> {
        let current = self.builder.build()?;
        let current_text = current.render();

        let target = NormalizedPath::new(self.builder.repo_root().join(self.manifest.to_native()));
        // Compared as bytes so a non-UTF-8 manifest is drift, not an I/O error
        let outcome = match io::read_bytes_if_exists(&target)? {
            None => {
                warn!(manifest = %self.manifest, "persisted manifest not found");
                VerifyOutcome::Absent
            }
            Some(persisted) if persisted == current_text.as_bytes() => {
                debug!(manifest = %self.manifest, "manifest matches");
                VerifyOutcome::Match
            }
            Some(persisted) => {
                let drift = ManifestDrift::compute(&String::from_utf8_lossy(&persisted), &current_text);
                warn!(
                    manifest = %self.manifest,
                    added = drift.added.len(),
                    removed = drift.removed.len(),
                    changed = drift.changed.len(),
                    "manifest is out of date"
                );
                VerifyOutcome::Mismatch(drift)
            }
        };

        Ok(VerifyReport {
            outcome,
            manifest: self.manifest.clone(),
            entries: current.len(),
        })
    }
}
