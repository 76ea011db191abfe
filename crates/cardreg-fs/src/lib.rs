//! Filesystem primitives for the Agent Card registry tool
//!
//! Provides forward-slash path normalization, the SHA-256 digest primitive,
//! atomic writes, and format-aware config loading.

pub mod checksum;
pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod path;

pub use checksum::{compute_content_checksum, compute_file_checksum, parse_checksum};
pub use config::ConfigStore;
pub use constants::RegistryPath;
pub use error::{Error, Result};
pub use path::{NormalizedPath, resolve_root};
