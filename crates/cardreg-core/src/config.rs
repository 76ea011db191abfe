//! Registry configuration
//!
//! Everything the tool needs to know about a registry checkout: which roots
//! are canonical, what to exclude, where the manifest lives, and where cards,
//! schemas and sidecars are found. Loaded from an optional `cardreg.toml` at
//! the repository root; an absent file means the built-in defaults.

use std::path::{Component, Path};

use cardreg_fs::{ConfigStore, NormalizedPath, RegistryPath};
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::manifest::ExclusionRules;

/// Top-level registry configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
    pub checksums: ChecksumConfig,
    pub cards: CardsConfig,
    pub mirror: MirrorConfig,
}

impl RegistryConfig {
    /// Load `cardreg.toml` from `repo_root`, or defaults if it does not exist.
    pub fn load(repo_root: &Path) -> Result<Self> {
        let path = NormalizedPath::new(repo_root.join(RegistryPath::ConfigFile));
        let config: Self = ConfigStore::new().load_or_default(&path)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would let the tool read or write outside the repository.
    pub fn validate(&self) -> Result<()> {
        self.checksums.validate()?;
        for (field, value) in [
            ("cards.agents_dir", &self.cards.agents_dir),
            ("cards.base_schema", &self.cards.base_schema),
            ("cards.schemas_dir", &self.cards.schemas_dir),
            ("cards.examples_dir", &self.cards.examples_dir),
            ("cards.checksums_dir", &self.cards.checksums_dir),
        ] {
            ensure_relative(field, value)?;
        }
        Ok(())
    }
}

/// Settings for the checksum manifest
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChecksumConfig {
    /// Manifest location relative to the repository root
    pub manifest: String,
    /// Canonical roots whose contents are hashed
    pub roots: Vec<String>,
    /// Directory names pruned wherever they appear
    pub exclude_dirs: Vec<String>,
    /// Repository-relative path prefixes that are never hashed
    pub exclude_prefixes: Vec<String>,
    /// File base names that are never hashed
    pub exclude_files: Vec<String>,
}

impl Default for ChecksumConfig {
    fn default() -> Self {
        Self {
            manifest: RegistryPath::Manifest.as_str().to_string(),
            roots: [
                RegistryPath::AgentsDir,
                RegistryPath::MetaDir,
                RegistryPath::WellKnownDir,
                RegistryPath::SchemasDir,
                RegistryPath::ExamplesDir,
            ]
            .iter()
            .map(|p| p.as_str().to_string())
            .collect(),
            exclude_dirs: vec!["node_modules".into(), ".git".into()],
            exclude_prefixes: Vec::new(),
            exclude_files: vec![".DS_Store".into(), "Thumbs.db".into(), "desktop.ini".into()],
        }
    }
}

impl ChecksumConfig {
    /// Manifest path relative to the repository root.
    pub fn manifest_path(&self) -> NormalizedPath {
        NormalizedPath::new(&self.manifest)
    }

    /// Build the exclusion rules, always including the manifest's own name.
    pub fn exclusion_rules(&self) -> ExclusionRules {
        let mut rules = ExclusionRules::new();
        for name in &self.exclude_dirs {
            rules = rules.exclude_dir_name(name);
        }
        for prefix in &self.exclude_prefixes {
            rules = rules.exclude_prefix(prefix);
        }
        for name in &self.exclude_files {
            rules = rules.exclude_file_name(name);
        }
        if let Some(name) = self.manifest_path().file_name() {
            rules = rules.exclude_file_name(name);
        }
        rules
    }

    fn validate(&self) -> Result<()> {
        if self.manifest.trim().is_empty() {
            return Err(Error::invalid_config("checksums.manifest must not be empty"));
        }
        ensure_relative("checksums.manifest", &self.manifest)?;
        for root in &self.roots {
            if root.trim().is_empty() {
                return Err(Error::invalid_config("checksums.roots entries must not be empty"));
            }
            ensure_relative("checksums.roots", root)?;
        }
        Ok(())
    }
}

/// Locations of cards, schemas, examples and sidecar checksums
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CardsConfig {
    pub agents_dir: String,
    /// Schema version directory under `agents_dir` that is validated
    pub version: String,
    pub base_schema: String,
    pub schemas_dir: String,
    pub examples_dir: String,
    pub checksums_dir: String,
}

impl Default for CardsConfig {
    fn default() -> Self {
        Self {
            agents_dir: RegistryPath::AgentsDir.as_str().into(),
            version: "v1.0.0".into(),
            base_schema: "schemas/v1.0.0/commons/agent.card.base.schema.json".into(),
            schemas_dir: "schemas/v1.0.0/commons".into(),
            examples_dir: "examples/v1.0.0/commons".into(),
            checksums_dir: RegistryPath::ChecksumsDir.as_str().into(),
        }
    }
}

/// IPFS and HTTP roots used when mirroring schema URLs
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MirrorConfig {
    pub ipfs_root: String,
    pub http_root: String,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            ipfs_root: "ipfs://bafybeigvf6nkzws7dblos74dqqjkguwkrwn4a2c27ieygoxmgofyzdkz6m".into(),
            http_root: "https://commandlayer.org/schemas/v1.0.0".into(),
        }
    }
}

fn ensure_relative(field: &str, value: &str) -> Result<()> {
    let path = Path::new(value);
    let escapes = path
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes {
        return Err(Error::invalid_config(format!(
            "{field} must be a path inside the repository, got {value:?}"
        )));
    }
    Ok(())
}
