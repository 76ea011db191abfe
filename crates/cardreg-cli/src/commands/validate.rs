//! Validate command implementation

use std::path::Path;

use colored::Colorize;

use cardreg_cards::{CardCheck, CardStatus, CardValidator, ValidationReport};

use super::checksums::check_sidecars;
use super::open_registry;
use crate::cli::ValidateMode;
use crate::error::{CliError, Result};

/// Run the validate command
///
/// Every selected check runs even if an earlier one failed; the command
/// fails if any of them did.
pub fn run_validate(path: &Path, mode: ValidateMode) -> Result<()> {
    let (root, config) = open_registry(path)?;
    let validator = CardValidator::new(&root, &config.cards);
    let mut failed = Vec::new();

    if mode.includes_agents() {
        println!("{} Validating agent cards...", "=>".blue().bold());
        let schema = validator.load_base_schema()?;
        let report = validator.validate_agents(&schema)?;
        if !print_report(&report, "agent cards") {
            failed.push("agents");
        }
    }

    if mode.includes_examples() {
        println!("{} Validating schema examples...", "=>".blue().bold());
        let report = validator.validate_examples()?;
        if !print_report(&report, "schema examples") {
            failed.push("examples");
        }
    }

    if mode.includes_checksums() {
        if let Err(e) = check_sidecars(&root, &config.cards) {
            println!("{} {}", "ERROR".red().bold(), e);
            failed.push("checksums");
        }
    }

    if failed.is_empty() {
        Ok(())
    } else {
        Err(CliError::user(format!("validation failed: {}", failed.join(", "))))
    }
}

/// Print failures and a summary line. Returns true when everything passed.
fn print_report(report: &ValidationReport, what: &str) -> bool {
    for check in report.failures() {
        print_failure(check);
    }

    let total = report.checks.len();
    let failed = report.failures().count();
    if total == 0 {
        println!("{} No {} found.", "WARN".yellow().bold(), what);
        true
    } else if failed == 0 {
        println!("{} {} {} valid.", "OK".green().bold(), total, what);
        true
    } else {
        println!("{} {} of {} {} invalid.", "INVALID".red().bold(), failed, total, what);
        false
    }
}

fn print_failure(check: &CardCheck) {
    let subject = match &check.instance {
        Some(instance) => format!("{} (schema {})", instance, check.file),
        None => check.file.to_string(),
    };
    match &check.status {
        CardStatus::Valid => {}
        CardStatus::InvalidJson { message } => {
            println!("   {} {}: invalid JSON: {}", "x".red(), subject.cyan(), message);
        }
        CardStatus::Invalid { violations } => {
            println!("   {} {}", "x".red(), subject.cyan());
            for violation in violations {
                println!("       {}", violation);
            }
        }
        CardStatus::MissingExample { expected } => {
            println!("   {} {}: missing example {}", "x".red(), check.file.as_str().cyan(), expected);
        }
        CardStatus::SchemaError { message } => {
            println!("   {} {}: schema error: {}", "x".red(), check.file.as_str().cyan(), message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardreg_test_utils::TestRegistry;
    use cardreg_test_utils::cards::{base_schema, sample_card};
    use serde_json::json;

    const BASE_SCHEMA: &str = "schemas/v1.0.0/commons/agent.card.base.schema.json";

    #[test]
    fn test_valid_cards_pass() {
        let registry = TestRegistry::new();
        registry.write_json(BASE_SCHEMA, &base_schema());
        registry.write_json("agents/v1.0.0/commons/a.json", &sample_card("a.eth"));

        run_validate(registry.root(), ValidateMode::Agents).unwrap();
    }

    #[test]
    fn test_invalid_card_fails() {
        let registry = TestRegistry::new();
        registry.write_json(BASE_SCHEMA, &base_schema());
        registry.write_json("agents/v1.0.0/commons/a.json", &json!({ "id": "a" }));

        let err = run_validate(registry.root(), ValidateMode::Agents).unwrap_err();
        assert!(err.to_string().contains("agents"));
    }

    #[test]
    fn test_missing_base_schema_is_fatal() {
        let registry = TestRegistry::new();
        registry.write_json("agents/v1.0.0/commons/a.json", &sample_card("a.eth"));

        let err = run_validate(registry.root(), ValidateMode::Agents).unwrap_err();
        assert!(matches!(err, CliError::Cards(_)));
    }

    #[test]
    fn test_checksums_mode_skips_schema() {
        let registry = TestRegistry::new();
        run_validate(registry.root(), ValidateMode::Checksums).unwrap();
    }
}
