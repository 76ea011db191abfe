//! Card validation against JSON Schema
//!
//! Schema semantics are delegated to a [`SchemaValidator`]; the default
//! [`JsonSchemaValidator`] is backed by the `jsonschema` crate. This module
//! only decides which documents are checked against which schema and
//! collects the results.

use std::path::{Path, PathBuf};

use cardreg_core::CardsConfig;
use cardreg_fs::{NormalizedPath, io};
use jsonschema::Validator;
use serde_json::Value;
use tracing::{debug, warn};

use crate::discover::find_files;
use crate::error::{Error, Result};

const SCHEMA_SUFFIX: &str = ".agent.card.schema.json";
const EXAMPLE_SUFFIX: &str = ".example.json";

/// One schema violation within a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON pointer into the instance, `/` for the document root
    pub path: String,
    pub message: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.path, self.message)
    }
}

/// Validates JSON instances against one compiled schema.
pub trait SchemaValidator {
    /// Return every violation; an empty list means the instance is valid.
    fn validate(&self, instance: &Value) -> Vec<Violation>;
}

/// [`SchemaValidator`] backed by the `jsonschema` crate.
pub struct JsonSchemaValidator {
    compiled: Validator,
}

impl JsonSchemaValidator {
    pub fn compile(schema: &Value, origin: &Path) -> Result<Self> {
        let compiled = Validator::new(schema).map_err(|e| Error::SchemaCompile {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(Self { compiled })
    }
}

impl SchemaValidator for JsonSchemaValidator {
    fn validate(&self, instance: &Value) -> Vec<Violation> {
        match self.compiled.validate(instance) {
            Ok(()) => Vec::new(),
            Err(errors) => errors
                .map(|e| {
                    let pointer = e.instance_path.to_string();
                    Violation {
                        path: if pointer.is_empty() { "/".to_string() } else { pointer },
                        message: e.to_string(),
                    }
                })
                .collect(),
        }
    }
}

/// Outcome for one checked document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardStatus {
    Valid,
    InvalidJson { message: String },
    Invalid { violations: Vec<Violation> },
    /// A schema has no paired example document
    MissingExample { expected: NormalizedPath },
    /// A per-file schema failed to compile
    SchemaError { message: String },
}

/// One document and what happened to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardCheck {
    /// The card, or for example checks the schema being exercised
    pub file: NormalizedPath,
    /// The example instance validated against `file`, if any
    pub instance: Option<NormalizedPath>,
    pub status: CardStatus,
}

/// All checks from one validation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub checks: Vec<CardCheck>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.checks.iter().all(|c| c.status == CardStatus::Valid)
    }

    pub fn failures(&self) -> impl Iterator<Item = &CardCheck> {
        self.checks.iter().filter(|c| c.status != CardStatus::Valid)
    }
}

/// Runs card and example validation for one repository.
#[derive(Debug, Clone)]
pub struct CardValidator {
    repo_root: PathBuf,
    config: CardsConfig,
}

impl CardValidator {
    pub fn new(repo_root: impl Into<PathBuf>, config: &CardsConfig) -> Self {
        Self {
            repo_root: repo_root.into(),
            config: config.clone(),
        }
    }

    /// Compile the shared base schema.
    ///
    /// A missing or uncompilable base schema is fatal.
    pub fn load_base_schema(&self) -> Result<JsonSchemaValidator> {
        let path = self.repo_root.join(&self.config.base_schema);
        if !path.is_file() {
            return Err(Error::SchemaNotFound { path });
        }
        let schema = self.read_json(&path)?;
        JsonSchemaValidator::compile(&schema, &path)
    }

    /// Validate every card under `<agents_dir>/<version>/` against `validator`.
    pub fn validate_agents(&self, validator: &dyn SchemaValidator) -> Result<ValidationReport> {
        let dir = format!("{}/{}", self.config.agents_dir, self.config.version);
        let cards = find_files(&self.repo_root, &dir, ".json")?;
        if cards.is_empty() {
            warn!(dir, "no agent cards found");
        }

        let mut checks = Vec::with_capacity(cards.len());
        for file in cards {
            let status = match self.read_json(&self.repo_root.join(file.to_native())) {
                Err(Error::InvalidJson { message, .. }) => CardStatus::InvalidJson { message },
                Err(e) => return Err(e),
                Ok(card) => status_from(validator.validate(&card)),
            };
            debug!(card = %file, status = ?status, "validated card");
            checks.push(CardCheck {
                file,
                instance: None,
                status,
            });
        }
        Ok(ValidationReport { checks })
    }

    /// Validate each `<name>.agent.card.schema.json` against its paired
    /// `<name>.example.json`.
    pub fn validate_examples(&self) -> Result<ValidationReport> {
        let schemas = find_files(&self.repo_root, &self.config.schemas_dir, SCHEMA_SUFFIX)?;
        if schemas.is_empty() {
            warn!(dir = %self.config.schemas_dir, "no agent card schemas found");
        }

        let mut checks = Vec::with_capacity(schemas.len());
        for schema_file in schemas {
            let base = schema_file
                .file_name()
                .and_then(|n| n.strip_suffix(SCHEMA_SUFFIX))
                .unwrap_or_default()
                .to_string();
            let example = NormalizedPath::new(&self.config.examples_dir)
                .join(&format!("{base}{EXAMPLE_SUFFIX}"));
            let status = self.check_example(&schema_file, &example)?;
            debug!(schema = %schema_file, example = %example, status = ?status, "validated example");
            checks.push(CardCheck {
                file: schema_file,
                instance: Some(example),
                status,
            });
        }
        Ok(ValidationReport { checks })
    }

    fn check_example(&self, schema_file: &NormalizedPath, example: &NormalizedPath) -> Result<CardStatus> {
        let schema_path = self.repo_root.join(schema_file.to_native());
        let schema = match self.read_json(&schema_path) {
            Ok(schema) => schema,
            Err(Error::InvalidJson { message, .. }) => return Ok(CardStatus::SchemaError { message }),
            Err(e) => return Err(e),
        };
        let validator = match JsonSchemaValidator::compile(&schema, &schema_path) {
            Ok(validator) => validator,
            Err(e) => {
                return Ok(CardStatus::SchemaError {
                    message: e.to_string(),
                });
            }
        };

        let example_path = self.repo_root.join(example.to_native());
        if !example_path.is_file() {
            return Ok(CardStatus::MissingExample {
                expected: example.clone(),
            });
        }
        match self.read_json(&example_path) {
            Ok(instance) => Ok(status_from(validator.validate(&instance))),
            Err(Error::InvalidJson { message, .. }) => Ok(CardStatus::InvalidJson { message }),
            Err(e) => Err(e),
        }
    }

    fn read_json(&self, path: &Path) -> Result<Value> {
        let text = io::read_text(&NormalizedPath::new(path))?;
        serde_json::from_str(&text).map_err(|e| Error::InvalidJson {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

fn status_from(violations: Vec<Violation>) -> CardStatus {
    if violations.is_empty() {
        CardStatus::Valid
    } else {
        CardStatus::Invalid { violations }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardreg_test_utils::TestRegistry;
    use cardreg_test_utils::cards::{base_schema, sample_card};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    struct RejectAll;

    impl SchemaValidator for RejectAll {
        fn validate(&self, _instance: &Value) -> Vec<Violation> {
            vec![Violation {
                path: "/".into(),
                message: "rejected".into(),
            }]
        }
    }

    fn validator(registry: &TestRegistry) -> CardValidator {
        CardValidator::new(registry.root(), &CardsConfig::default())
    }

    fn with_base_schema() -> TestRegistry {
        let registry = TestRegistry::new();
        registry.write_json("schemas/v1.0.0/commons/agent.card.base.schema.json", &base_schema());
        registry
    }

    #[test]
    fn test_missing_base_schema_is_fatal() {
        let registry = TestRegistry::new();
        let result = validator(&registry).load_base_schema();
        assert!(matches!(result, Err(Error::SchemaNotFound { .. })));
    }

    #[test]
    fn test_valid_and_invalid_cards() {
        let registry = with_base_schema();
        registry.write_json("agents/v1.0.0/commons/good.json", &sample_card("good.eth"));
        let mut bad = sample_card("bad.eth");
        bad["slug"] = json!("Not A Slug");
        bad.as_object_mut().unwrap().remove("schemas");
        registry.write_json("agents/v1.0.0/commons/bad.json", &bad);
        registry.write_file("agents/v1.0.0/commons/broken.json", "{ not json");

        let v = validator(&registry);
        let base = v.load_base_schema().unwrap();
        let report = v.validate_agents(&base).unwrap();

        assert_eq!(report.checks.len(), 3);
        assert!(!report.is_ok());
        let by_name = |name: &str| {
            report
                .checks
                .iter()
                .find(|c| c.file.as_str().ends_with(name))
                .unwrap()
                .status
                .clone()
        };
        assert_eq!(by_name("good.json"), CardStatus::Valid);
        assert!(matches!(by_name("broken.json"), CardStatus::InvalidJson { .. }));
        match by_name("bad.json") {
            CardStatus::Invalid { violations } => {
                assert!(violations.iter().any(|v| v.path == "/slug"));
                assert!(violations.iter().any(|v| v.path == "/"));
            }
            other => panic!("expected violations, got {other:?}"),
        }
    }

    #[test]
    fn test_validator_seam_is_used() {
        let registry = TestRegistry::new();
        registry.write_json("agents/v1.0.0/commons/a.json", &sample_card("a.eth"));

        let report = validator(&registry).validate_agents(&RejectAll).unwrap();
        assert_eq!(report.failures().count(), 1);
    }

    #[test]
    fn test_no_cards_is_ok() {
        let registry = TestRegistry::new();
        let report = validator(&registry).validate_agents(&RejectAll).unwrap();
        assert!(report.checks.is_empty());
        assert!(report.is_ok());
    }

    #[test]
    fn test_examples_pair_with_schemas() {
        let registry = TestRegistry::new();
        registry.write_json(
            "schemas/v1.0.0/commons/summarize.agent.card.schema.json",
            &base_schema(),
        );
        registry.write_json(
            "examples/v1.0.0/commons/summarize.example.json",
            &sample_card("summarize.eth"),
        );
        registry.write_json(
            "schemas/v1.0.0/commons/translate.agent.card.schema.json",
            &base_schema(),
        );

        let report = validator(&registry).validate_examples().unwrap();

        assert_eq!(report.checks.len(), 2);
        assert_eq!(report.checks[0].status, CardStatus::Valid);
        assert_eq!(
            report.checks[1].status,
            CardStatus::MissingExample {
                expected: NormalizedPath::new("examples/v1.0.0/commons/translate.example.json"),
            }
        );
    }

    #[test]
    fn test_uncompilable_example_schema_is_reported_not_fatal() {
        let registry = TestRegistry::new();
        registry.write_json(
            "schemas/v1.0.0/commons/odd.agent.card.schema.json",
            &json!({ "type": 12 }),
        );

        let report = validator(&registry).validate_examples().unwrap();
        assert!(matches!(report.checks[0].status, CardStatus::SchemaError { .. }));
    }
}
