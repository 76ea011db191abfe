//! Checksum manifest
//!
//! A manifest is the sorted list of `"<sha256-hex>  <relative-path>"` lines
//! covering every included file under the canonical roots. Its rendered text
//! is the persisted artifact and the unit of comparison during verify.
//!
//! An empty file set renders as a lone `"\n"`, so the text always ends with
//! exactly one newline.

mod builder;
mod generate;
mod rules;
mod verifier;

pub use builder::ManifestBuilder;
pub use generate::{GenerateReport, generate};
pub use rules::ExclusionRules;
pub use verifier::{ManifestDrift, ManifestVerifier, VerifyOutcome, VerifyReport};

use std::collections::BTreeMap;

use cardreg_fs::NormalizedPath;

/// Separator between digest and path on every manifest line
pub const SEPARATOR: &str = "  ";

/// One hashed file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// Lowercase hex SHA-256 of the file's raw bytes
    pub digest: String,
    /// Repository-relative forward-slash path
    pub path: NormalizedPath,
}

/// The full set of hashed files, sorted by path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    entries: Vec<ManifestEntry>,
}

impl Manifest {
    /// Build a manifest from entries in any order.
    ///
    /// Entries are sorted by path with a byte-wise comparison.
    pub fn from_entries(mut entries: Vec<ManifestEntry>) -> Self {
        entries.sort_by(|a, b| a.path.as_str().cmp(b.path.as_str()));
        Self { entries }
    }

    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the canonical manifest text.
    pub fn render(&self) -> String {
        if self.entries.is_empty() {
            return "\n".to_string();
        }
        let mut out = String::new();
        for entry in &self.entries {
            out.push_str(&entry.digest);
            out.push_str(SEPARATOR);
            out.push_str(entry.path.as_str());
            out.push('\n');
        }
        out
    }

    /// Map of path to digest, used to describe drift between two texts.
    pub(crate) fn digests_by_path(&self) -> BTreeMap<&str, &str> {
        self.entries
            .iter()
            .map(|e| (e.path.as_str(), e.digest.as_str()))
            .collect()
    }
}

/// Leniently parse persisted manifest text.
///
/// Blank lines are ignored; lines without the two-space separator are
/// returned separately so drift reports can mention them.
pub fn parse_lenient(text: &str) -> (Manifest, Vec<String>) {
    let mut entries = Vec::new();
    let mut malformed = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        match line.split_once(SEPARATOR) {
            Some((digest, path)) if !digest.is_empty() && !path.is_empty() => {
                entries.push(ManifestEntry {
                    digest: digest.to_string(),
                    path: NormalizedPath::new(path),
                });
            }
            _ => malformed.push(line.to_string()),
        }
    }
    (Manifest::from_entries(entries), malformed)
}
