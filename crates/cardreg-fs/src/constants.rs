//! Well-known registry paths.

use std::path::Path;

/// Standard registry filesystem locations, relative to the repository root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryPath {
    /// The persisted checksum manifest
    Manifest,
    /// Optional tool configuration
    ConfigFile,
    /// Agent Card definitions
    AgentsDir,
    /// Registry metadata
    MetaDir,
    /// Well-known descriptors
    WellKnownDir,
    /// Schema documents
    SchemasDir,
    /// Example instances for schemas
    ExamplesDir,
    /// Per-card sidecar checksum files
    ChecksumsDir,
}

impl RegistryPath {
    /// Get the string representation of the path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manifest => "checksums.txt",
            Self::ConfigFile => "cardreg.toml",
            Self::AgentsDir => "agents",
            Self::MetaDir => "meta",
            Self::WellKnownDir => ".well-known",
            Self::SchemasDir => "schemas",
            Self::ExamplesDir => "examples",
            Self::ChecksumsDir => "checksums",
        }
    }
}

impl AsRef<Path> for RegistryPath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for RegistryPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for RegistryPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
