//! Checksum manifest core for the Agent Card registry
//!
//! This crate implements the registry's integrity protocol:
//!
//! - **Manifest builder**: deterministic, exclusion-aware hashing of the
//!   canonical roots into sorted `digest  path` text
//! - **Manifest verifier**: read-only, byte-exact comparison against the
//!   persisted manifest, reporting `Match`, `Absent` or `Mismatch`
//! - **Generate**: unconditional atomic overwrite of the manifest
//! - **Sidecars**: optional per-card `.sha256` verification
//! - **Configuration**: the optional `cardreg.toml`
//!
//! # Architecture
//!
//! ```text
//!          cardreg-cli
//!           /       \
//!   cardreg-cards    |
//!           \       /
//!         cardreg-core
//!              |
//!         cardreg-fs
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod manifest;
pub mod sidecar;

pub use config::{CardsConfig, ChecksumConfig, MirrorConfig, RegistryConfig};
pub use engine::ChecksumEngine;
pub use error::{Error, Result};
pub use manifest::{
    ExclusionRules, GenerateReport, Manifest, ManifestBuilder, ManifestDrift, ManifestEntry,
    ManifestVerifier, VerifyOutcome, VerifyReport,
};
pub use sidecar::{SidecarReport, SidecarResult, SidecarStatus, SidecarVerifier};
