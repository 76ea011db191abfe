//! Checksum manifest and sidecar commands

use std::path::Path;

use colored::Colorize;

use cardreg_core::{ChecksumEngine, ManifestDrift, SidecarStatus, SidecarVerifier, VerifyOutcome};

use super::open_registry;
use crate::error::{CliError, Result};

/// Run the checksums command
///
/// Generates the manifest, or with `verify` compares against it without
/// writing anything.
pub fn run_checksums(path: &Path, verify: bool, show_diff: bool) -> Result<()> {
    let (root, config) = open_registry(path)?;
    let engine = ChecksumEngine::new(&root, &config.checksums);

    if !verify {
        let report = engine.generate()?;
        println!(
            "{} {} written with {} entries.",
            "OK".green().bold(),
            report.manifest,
            report.entries
        );
        return Ok(());
    }

    let report = engine.verify()?;
    match report.outcome {
        VerifyOutcome::Match => {
            println!(
                "{} {} matches the current repo contents ({} entries).",
                "OK".green().bold(),
                report.manifest,
                report.entries
            );
            Ok(())
        }
        VerifyOutcome::Absent => {
            println!("{} {} not found.", "ABSENT".yellow().bold(), report.manifest);
            println!("Run {} to generate it.", "cardreg checksums".cyan());
            Err(CliError::user(format!("{} not found", report.manifest)))
        }
        VerifyOutcome::Mismatch(drift) => {
            println!("{} {} is out of date.", "MISMATCH".red().bold(), report.manifest);
            print_drift(&drift, show_diff);
            println!();
            println!("Run {} to regenerate it.", "cardreg checksums".cyan());
            Err(CliError::user(format!("{} is out of date", report.manifest)))
        }
    }
}

fn print_drift(drift: &ManifestDrift, show_diff: bool) {
    for path in &drift.added {
        println!("   {} {}", "+".green(), path);
    }
    for path in &drift.removed {
        println!("   {} {}", "-".red(), path);
    }
    for path in &drift.changed {
        println!("   {} {}", "~".yellow(), path);
    }
    for line in &drift.malformed {
        println!("   {} malformed line: {}", "!".red(), line.dimmed());
    }
    if drift.is_formatting_only() {
        println!("   {} entries agree; only layout differs", "!".yellow());
    }
    if show_diff {
        println!();
        print!("{}", drift.diff);
    }
}

/// Run the sidecars command
///
/// Verifies every `.sha256` sidecar against the card it names.
pub fn run_sidecars(path: &Path) -> Result<()> {
    let (root, config) = open_registry(path)?;
    check_sidecars(&root, &config.cards)
}

pub(crate) fn check_sidecars(root: &Path, cards: &cardreg_core::CardsConfig) -> Result<()> {
    println!("{} Verifying sidecar checksums...", "=>".blue().bold());
    let report = SidecarVerifier::new(root, cards).verify()?;

    if report.results.is_empty() {
        println!("{} No sidecar checksum files found.", "WARN".yellow().bold());
        return Ok(());
    }

    for result in report.failures() {
        let detail = match &result.status {
            SidecarStatus::Match => continue,
            SidecarStatus::Empty => "empty checksum file".to_string(),
            SidecarStatus::MissingTarget => format!("target not found: {}", result.target),
            SidecarStatus::Mismatch { expected, actual } => {
                format!("expected {expected}, got {actual}")
            }
        };
        println!("   {} {}: {}", "x".red(), result.sidecar.as_str().cyan(), detail);
    }

    let failed = report.failures().count();
    if failed == 0 {
        println!(
            "{} {} sidecar checksums verified.",
            "OK".green().bold(),
            report.results.len()
        );
        Ok(())
    } else {
        Err(CliError::user(format!(
            "{failed} of {} sidecar checksums failed",
            report.results.len()
        )))
    }
}
