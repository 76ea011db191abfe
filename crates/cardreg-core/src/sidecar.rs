//! Per-card sidecar checksum verification
//!
//! A sidecar `checksums/<group>/<name>.sha256` holds the digest of
//! `agents/<version>/<group>/<name>.json`, either bare hex or prefixed with
//! `sha256:`. This is an alternative to the manifest built on the same
//! digest primitive; it never writes anything.

use std::path::{Path, PathBuf};

use cardreg_fs::{NormalizedPath, compute_file_checksum, io, parse_checksum};
use tracing::debug;
use walkdir::WalkDir;

use crate::config::CardsConfig;
use crate::error::Result;

const SIDECAR_EXTENSION: &str = ".sha256";

/// Outcome for a single sidecar file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidecarStatus {
    Match,
    /// The sidecar has no checksum in it
    Empty,
    /// The card the sidecar points at does not exist
    MissingTarget,
    Mismatch { expected: String, actual: String },
}

/// One sidecar and the card it covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidecarResult {
    pub sidecar: NormalizedPath,
    pub target: NormalizedPath,
    pub status: SidecarStatus,
}

/// All sidecars found under the checksums directory, in path order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SidecarReport {
    pub results: Vec<SidecarResult>,
}

impl SidecarReport {
    pub fn is_ok(&self) -> bool {
        self.results.iter().all(|r| r.status == SidecarStatus::Match)
    }

    pub fn failures(&self) -> impl Iterator<Item = &SidecarResult> {
        self.results.iter().filter(|r| r.status != SidecarStatus::Match)
    }
}

/// Checks sidecar files against the cards they describe.
#[derive(Debug, Clone)]
pub struct SidecarVerifier {
    repo_root: PathBuf,
    checksums_dir: String,
    cards_root: NormalizedPath,
}

impl SidecarVerifier {
    pub fn new(repo_root: impl Into<PathBuf>, config: &CardsConfig) -> Self {
        Self {
            repo_root: repo_root.into(),
            checksums_dir: config.checksums_dir.clone(),
            cards_root: NormalizedPath::new(&config.agents_dir).join(&config.version),
        }
    }

    pub fn verify(&self) -> Result<SidecarReport> {
        let dir = self.repo_root.join(&self.checksums_dir);
        if !dir.is_dir() {
            debug!(dir = %self.checksums_dir, "no sidecar directory");
            return Ok(SidecarReport::default());
        }

        let mut results = Vec::new();
        for entry in WalkDir::new(&dir).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(name) = entry.file_name().to_str() else {
                continue;
            };
            let Some(stem) = name.strip_suffix(SIDECAR_EXTENSION) else {
                continue;
            };
            results.push(self.check_one(entry.path(), stem)?);
        }
        Ok(SidecarReport { results })
    }

    fn check_one(&self, sidecar_path: &Path, stem: &str) -> Result<SidecarResult> {
        let group = sidecar_path
            .parent()
            .and_then(Path::file_name)
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let target = self.cards_root.join(&group).join(&format!("{stem}.json"));
        let sidecar = NormalizedPath::relative(sidecar_path, &self.repo_root)
            .unwrap_or_else(|| NormalizedPath::new(sidecar_path));

        let contents = io::read_text(&NormalizedPath::new(sidecar_path))?;
        let status = match parse_checksum(&contents) {
            None => SidecarStatus::Empty,
            Some(expected) => {
                let target_path = self.repo_root.join(target.to_native());
                if !target_path.is_file() {
                    SidecarStatus::MissingTarget
                } else {
                    let actual = compute_file_checksum(&target_path)?;
                    if actual == expected {
                        SidecarStatus::Match
                    } else {
                        SidecarStatus::Mismatch {
                            expected: expected.to_string(),
                            actual,
                        }
                    }
                }
            }
        };
        debug!(sidecar = %sidecar, status = ?status, "checked sidecar");

        Ok(SidecarResult {
            sidecar,
            target,
            status,
        })
    }
}
