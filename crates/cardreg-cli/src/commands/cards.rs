//! Reorder and mirror command implementations
//!
//! Both rewrite cards in place; `--dry-run` reports what would change.

use std::path::Path;

use colored::Colorize;

use cardreg_cards::{RewriteReport, RewriteStatus, mirror_cards, reorder_cards};

use super::open_registry;
use crate::error::{CliError, Result};

/// Run the reorder command
pub fn run_reorder(path: &Path, dry_run: bool) -> Result<()> {
    let (root, config) = open_registry(path)?;
    println!("{} Reordering card keys...", "=>".blue().bold());
    let report = reorder_cards(&root, &config.cards.agents_dir, dry_run)?;
    finish(&report, "reordered")
}

/// Run the mirror command
pub fn run_mirror(path: &Path, dry_run: bool) -> Result<()> {
    let (root, config) = open_registry(path)?;
    println!("{} Mirroring schema URLs...", "=>".blue().bold());
    let report = mirror_cards(&root, &config.cards.agents_dir, &config.mirror, dry_run)?;
    finish(&report, "mirrored")
}

fn finish(report: &RewriteReport, verb: &str) -> Result<()> {
    let tag = if report.dry_run { "would update" } else { "updated" };
    for result in &report.results {
        match &result.status {
            RewriteStatus::Updated => println!("   {} {} {}", "+".green(), tag, result.file),
            RewriteStatus::Unchanged => tracing::debug!(card = %result.file, "unchanged"),
            RewriteStatus::Skipped { reason } => {
                println!("   {} skip {}: {}", "-".yellow(), result.file, reason.dimmed());
            }
            RewriteStatus::Failed { message } => {
                println!("   {} {}: {}", "x".red(), result.file.as_str().cyan(), message);
            }
        }
    }

    let updated = report.updated();
    if report.dry_run {
        println!(
            "{} {} of {} cards would be {} (dry run, nothing written).",
            "DRY RUN".yellow().bold(),
            updated,
            report.results.len(),
            verb
        );
    } else {
        println!("{} {} of {} cards {}.", "OK".green().bold(), updated, report.results.len(), verb);
    }

    if report.has_failures() {
        let failed = report.count(|s| matches!(s, RewriteStatus::Failed { .. }));
        return Err(CliError::user(format!("{failed} cards could not be parsed")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardreg_test_utils::TestRegistry;
    use cardreg_test_utils::cards::sample_card;

    #[test]
    fn test_reorder_dry_run_writes_nothing() {
        let registry = TestRegistry::new();
        registry.write_json("agents/a.json", &sample_card("a.eth"));
        let before = registry.read_file("agents/a.json");

        run_reorder(registry.root(), true).unwrap();
        assert_eq!(registry.read_file("agents/a.json"), before);

        run_reorder(registry.root(), false).unwrap();
        assert!(registry.read_file("agents/a.json").starts_with("{\n  \"$schema\""));
    }

    #[test]
    fn test_mirror_adds_schemas_mirror() {
        let registry = TestRegistry::new();
        registry.write_json("agents/a.json", &sample_card("a.eth"));

        run_mirror(registry.root(), false).unwrap();
        registry.assert_file_contains("agents/a.json", "\"schemas_mirror\"");
    }

    #[test]
    fn test_unparsable_card_fails_command() {
        let registry = TestRegistry::new();
        registry.write_file("agents/broken.json", "{ nope");

        let err = run_reorder(registry.root(), false).unwrap_err();
        assert!(matches!(err, CliError::User { .. }));
    }
}
