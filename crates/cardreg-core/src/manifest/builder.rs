//! Manifest builder
//!
//! Walks each canonical root with an explicit work stack, prunes excluded
//! directories, hashes every surviving file, and sorts the result once,
//! globally, by path.

use std::path::{Path, PathBuf};

use cardreg_fs::{NormalizedPath, compute_file_checksum};
use tracing::{debug, info};
use walkdir::WalkDir;

use super::{ExclusionRules, Manifest, ManifestEntry};
use crate::config::ChecksumConfig;
use crate::error::{Error, Result};

/// Computes manifests for one repository checkout.
#[derive(Debug, Clone)]
pub struct ManifestBuilder {
    repo_root: PathBuf,
    roots: Vec<String>,
    rules: ExclusionRules,
}

impl ManifestBuilder {
    pub fn new(repo_root: impl Into<PathBuf>, roots: Vec<String>, rules: ExclusionRules) -> Self {
        Self {
            repo_root: repo_root.into(),
            roots,
            rules,
        }
    }

    /// Builder configured from the `[checksums]` section.
    pub fn from_config(repo_root: impl Into<PathBuf>, config: &ChecksumConfig) -> Self {
        Self::new(repo_root, config.roots.clone(), config.exclusion_rules())
    }

    pub fn repo_root(&self) -> &Path {
        &self.repo_root
    }

    pub fn rules(&self) -> &ExclusionRules {
        &self.rules
    }

    /// Collect every included file path, sorted and de-duplicated.
    ///
    /// Missing roots, and roots that are files, contribute nothing.
    pub fn collect_files(&self) -> Result<Vec<NormalizedPath>> {
        Ok(self.collect()?.into_iter().map(|(rel, _)| rel).collect())
    }

    /// Walk, hash and sort. Any unreadable file aborts the whole build.
    pub fn build(&self) -> Result<Manifest> {
        let files = self.collect()?;
        let mut entries = Vec::with_capacity(files.len());
        for (path, native) in files {
            let digest = compute_file_checksum(&native)?;
            entries.push(ManifestEntry { digest, path });
        }
        info!(entries = entries.len(), "built checksum manifest");
        Ok(Manifest::from_entries(entries))
    }

    /// Build and render in one step.
    pub fn build_text(&self) -> Result<String> {
        Ok(self.build()?.render())
    }

    /// Relative path paired with the path the walk yielded. Hashing uses the
    /// walked path, so names the normalized form cannot round-trip (a
    /// backslash on unix, non-UTF-8 bytes) are still read correctly.
    fn collect(&self) -> Result<Vec<(NormalizedPath, PathBuf)>> {
        let mut files = Vec::new();
        for root in &self.roots {
            self.collect_root(root, &mut files)?;
        }
        files.sort_by(|(a, _), (b, _)| a.as_str().cmp(b.as_str()));
        files.dedup_by(|(a, _), (b, _)| a == b);
        Ok(files)
    }

    fn collect_root(&self, root: &str, files: &mut Vec<(NormalizedPath, PathBuf)>) -> Result<()> {
        let root_path = self.repo_root.join(root);
        if !root_path.is_dir() {
            debug!(root, "root missing or not a directory, skipping");
            return Ok(());
        }

        let repo_root = self.repo_root.as_path();
        let rules = &self.rules;
        let walker = WalkDir::new(&root_path)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| {
                if entry.depth() == 0 || !entry.file_type().is_dir() {
                    return true;
                }
                match NormalizedPath::relative(entry.path(), repo_root) {
                    Some(rel) if rules.prunes_dir(&rel) => {
                        debug!(dir = %rel, "pruned excluded directory");
                        false
                    }
                    _ => true,
                }
            });

        let before = files.len();
        for entry in walker {
            let entry = entry?;
            if entry.file_type().is_dir() {
                continue;
            }
            let rel = NormalizedPath::relative(entry.path(), repo_root).ok_or_else(|| Error::Walk {
                path: entry.path().to_path_buf(),
                message: "path escaped the repository root".into(),
            })?;
            if rules.includes_file(&rel) {
                files.push((rel, entry.into_path()));
            }
        }
        debug!(root, files = files.len() - before, "walked root");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardreg_test_utils::TestRegistry;
    use pretty_assertions::assert_eq;

    fn default_builder(registry: &TestRegistry) -> ManifestBuilder {
        ManifestBuilder::from_config(registry.root(), &ChecksumConfig::default())
    }

    #[test]
    fn test_two_file_scenario() {
        let registry = TestRegistry::new();
        registry.write_file("agents/a.json", r#"{"x":1}"#);
        registry.write_file("meta/b.json", "{}");

        let manifest = default_builder(&registry).build().unwrap();

        assert_eq!(manifest.len(), 2);
        insta::assert_snapshot!(manifest.render(), @r"
        5041bf1f713df204784353e82f6a4a535931cb64f1f4b4a5aeaffcb720918b22  agents/a.json
        44136fa355b3678a1146ad16f7e8649e94fb4fc21fe77e8310c060f61caaff8a  meta/b.json
        ");
        assert!(manifest.render().ends_with("meta/b.json\n"));
    }

    #[test]
    fn test_missing_roots_contribute_nothing() {
        let registry = TestRegistry::new();
        let manifest = default_builder(&registry).build().unwrap();
        assert!(manifest.is_empty());
        assert_eq!(manifest.render(), "\n");
    }

    #[test]
    fn test_root_that_is_a_file_is_ignored() {
        let registry = TestRegistry::new();
        registry.write_file("meta", "not a directory");
        registry.write_file("agents/a.json", "{}");

        let files = default_builder(&registry).collect_files().unwrap();
        assert_eq!(files, vec![NormalizedPath::new("agents/a.json")]);
    }

    #[test]
    fn test_files_outside_roots_are_not_hashed() {
        let registry = TestRegistry::new();
        registry.write_file("README.md", "# registry");
        registry.write_file("scripts/run.sh", "echo");
        registry.write_file("agents/a.json", "{}");

        let files = default_builder(&registry).collect_files().unwrap();
        assert_eq!(files, vec![NormalizedPath::new("agents/a.json")]);
    }

    #[test]
    fn test_non_json_and_binary_files_are_hashed() {
        let registry = TestRegistry::new();
        registry.write_bytes("schemas/logo.png", &[0x89, 0x50, 0x4e, 0x47, 0x00, 0xff]);
        registry.write_file("schemas/notes.txt", "text");

        let manifest = default_builder(&registry).build().unwrap();
        assert_eq!(manifest.len(), 2);
        assert_eq!(
            manifest.entries()[0].digest,
            cardreg_fs::compute_content_checksum(&[0x89, 0x50, 0x4e, 0x47, 0x00, 0xff])
        );
    }

    #[test]
    fn test_exclusions_apply_under_canonical_roots() {
        let registry = TestRegistry::new();
        registry.write_file("agents/a.json", "{}");
        registry.write_file("agents/node_modules/dep/index.js", "x");
        registry.write_file("schemas/.git/HEAD", "ref");
        registry.write_file("meta/.DS_Store", "junk");
        registry.write_file("meta/checksums.txt", "self");

        let files = default_builder(&registry).collect_files().unwrap();
        assert_eq!(files, vec![NormalizedPath::new("agents/a.json")]);
    }

    #[test]
    fn test_duplicate_roots_do_not_duplicate_entries() {
        let registry = TestRegistry::new();
        registry.write_file("agents/a.json", "{}");

        let builder = ManifestBuilder::new(
            registry.root(),
            vec!["agents".into(), "agents".into()],
            ExclusionRules::new(),
        );
        assert_eq!(builder.build().unwrap().len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_file_aborts_build() {
        use std::os::unix::fs::PermissionsExt;

        let registry = TestRegistry::new();
        registry.write_file("agents/a.json", "{}");
        let locked = registry.write_file("agents/secret.json", "{}");
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o000)).unwrap();

        // Root ignores permission bits, so only assert when the file is really unreadable
        if std::fs::read(&locked).is_err() {
            let result = default_builder(&registry).build();
            assert!(matches!(result, Err(Error::Fs(_))));
        }

        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o644)).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_backslash_in_file_name_is_hashed_from_walked_path() {
        let registry = TestRegistry::new();
        registry.write_file("agents/a\\b.json", r#"{"x":1}"#);

        let manifest = default_builder(&registry).build().unwrap();

        assert_eq!(manifest.len(), 1);
        assert_eq!(
            manifest.entries()[0].digest,
            cardreg_fs::compute_content_checksum(br#"{"x":1}"#)
        );
    }
}
