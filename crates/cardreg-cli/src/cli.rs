//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Agent Card registry integrity tool
#[derive(Parser, Debug)]
#[command(name = "cardreg")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Registry repository root (defaults to the current directory)
    #[arg(long, global = true, env = "CARDREG_ROOT")]
    pub root: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Generate or verify the checksum manifest
    ///
    /// Without flags, recomputes the manifest and overwrites it.
    /// With --verify, compares against the persisted manifest and exits
    /// non-zero on drift. Verify never writes.
    ///
    /// Examples:
    ///   cardreg checksums            # regenerate checksums.txt
    ///   cardreg checksums --verify   # CI gate
    Checksums {
        /// Compare instead of writing
        #[arg(long)]
        verify: bool,

        /// On mismatch, also print the unified diff
        #[arg(long, requires = "verify")]
        diff: bool,
    },

    /// Validate cards, schema examples and sidecar checksums
    Validate {
        /// Which checks to run
        #[arg(long, value_enum, default_value_t = ValidateMode::All)]
        mode: ValidateMode,
    },

    /// Verify per-card sidecar checksum files
    Sidecars,

    /// Rewrite cards with canonical top-level key order
    Reorder {
        /// Report changes without writing
        #[arg(long)]
        dry_run: bool,
    },

    /// Add HTTP mirrors for IPFS schema URLs to every card
    Mirror {
        /// Report changes without writing
        #[arg(long)]
        dry_run: bool,
    },
}

/// Validation selection for `cardreg validate`
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidateMode {
    /// Cards, examples and sidecars
    All,
    /// Cards against the base schema
    Agents,
    /// Schema examples against their schemas
    Examples,
    /// Sidecar checksum files
    Checksums,
}

impl ValidateMode {
    pub fn includes_agents(self) -> bool {
        matches!(self, Self::All | Self::Agents)
    }

    pub fn includes_examples(self) -> bool {
        matches!(self, Self::All | Self::Examples)
    }

    pub fn includes_checksums(self) -> bool {
        matches!(self, Self::All | Self::Checksums)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksums_defaults_to_generate() {
        let cli = Cli::try_parse_from(["cardreg", "checksums"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Checksums {
                verify: false,
                diff: false
            })
        );
    }

    #[test]
    fn test_diff_requires_verify() {
        assert!(Cli::try_parse_from(["cardreg", "checksums", "--diff"]).is_err());
        assert!(Cli::try_parse_from(["cardreg", "checksums", "--verify", "--diff"]).is_ok());
    }

    #[test]
    fn test_global_root_after_subcommand() {
        let cli = Cli::try_parse_from(["cardreg", "checksums", "--root", "/tmp/reg"]).unwrap();
        assert_eq!(cli.root, Some(PathBuf::from("/tmp/reg")));
    }

    #[test]
    fn test_validate_mode_parsing() {
        let cli = Cli::try_parse_from(["cardreg", "validate", "--mode", "examples"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Validate {
                mode: ValidateMode::Examples
            })
        );
        assert!(ValidateMode::All.includes_checksums());
        assert!(!ValidateMode::Agents.includes_examples());
    }
}
