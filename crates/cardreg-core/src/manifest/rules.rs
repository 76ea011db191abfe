//! Inclusion and exclusion rules for the manifest walk
//!
//! Rules are evaluated against repository-relative, forward-slash paths so
//! they behave identically on every platform. Directory pruning is an
//! optimization only: [`ExclusionRules::prunes_dir`] returns `true` exactly
//! when every file beneath that directory would be rejected by
//! [`ExclusionRules::includes_file`].

use std::collections::BTreeSet;

use cardreg_fs::NormalizedPath;

/// Denylist applied to every walked entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionRules {
    dir_names: BTreeSet<String>,
    prefixes: Vec<String>,
    file_names: BTreeSet<String>,
}

impl ExclusionRules {
    /// Rules that exclude nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Exclude any path with a directory component named `name`.
    pub fn exclude_dir_name(mut self, name: impl Into<String>) -> Self {
        self.dir_names.insert(name.into());
        self
    }

    /// Exclude any path starting with `prefix`.
    pub fn exclude_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into().replace('\\', "/");
        if !prefix.is_empty() && !self.prefixes.contains(&prefix) {
            self.prefixes.push(prefix);
        }
        self
    }

    /// Exclude any file whose base name is `name`.
    pub fn exclude_file_name(mut self, name: impl Into<String>) -> Self {
        self.file_names.insert(name.into());
        self
    }

    /// Whether a file at `rel` belongs in the manifest.
    pub fn includes_file(&self, rel: &NormalizedPath) -> bool {
        if self.matches_prefix(rel.as_str()) {
            return false;
        }
        if let Some(name) = rel.file_name() {
            if self.file_names.contains(name) {
                return false;
            }
        }
        let mut segments: Vec<&str> = rel.segments().collect();
        segments.pop();
        !segments.iter().any(|s| self.dir_names.contains(*s))
    }

    /// Whether the walk can skip the directory at `rel` entirely.
    pub fn prunes_dir(&self, rel: &NormalizedPath) -> bool {
        if rel.segments().any(|s| self.dir_names.contains(s)) {
            return true;
        }
        // Every file below `rel` starts with `rel/`
        let as_dir = format!("{}/", rel.as_str().trim_end_matches('/'));
        self.matches_prefix(&as_dir)
    }

    fn matches_prefix(&self, path: &str) -> bool {
        self.prefixes.iter().any(|p| path.starts_with(p.as_str()))
    }
}
