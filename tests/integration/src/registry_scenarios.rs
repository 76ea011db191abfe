//! Registry-level scenarios spanning config loading, card rewriting and the
//! checksum manifest.

use cardreg_cards::{CardValidator, RewriteStatus, mirror_cards, reorder_cards};
use cardreg_core::{
    ChecksumEngine, RegistryConfig, SidecarStatus, SidecarVerifier, VerifyOutcome,
};
use cardreg_fs::compute_content_checksum;
use cardreg_test_utils::TestRegistry;
use cardreg_test_utils::cards::{base_schema, sample_card};
use pretty_assertions::assert_eq;

fn engine(registry: &TestRegistry) -> ChecksumEngine {
    let config = RegistryConfig::load(registry.root()).unwrap();
    ChecksumEngine::new(registry.root(), &config.checksums)
}

// =============================================================================
// Manifest lifecycle
// =============================================================================

#[test]
fn two_file_generate_then_delete_and_verify() {
    let registry = TestRegistry::new();
    registry.write_file("agents/a.json", r#"{"x":1}"#);
    registry.write_file("meta/b.json", "{}");

    let report = engine(&registry).generate().unwrap();
    assert_eq!(report.entries, 2);
    let persisted = registry.read_file("checksums.txt");
    assert_eq!(
        persisted,
        "5041bf1f713df204784353e82f6a4a535931cb64f1f4b4a5aeaffcb720918b22  agents/a.json\n\
         44136fa355b3678a1146ad16f7e8649e94fb4fc21fe77e8310c060f61caaff8a  meta/b.json\n"
    );

    registry.remove_file("meta/b.json");
    let verify = engine(&registry).verify().unwrap();

    match verify.outcome {
        VerifyOutcome::Mismatch(drift) => {
            assert_eq!(drift.removed, vec!["meta/b.json".to_string()]);
            assert!(drift.added.is_empty());
            assert!(drift.changed.is_empty());
        }
        other => panic!("expected mismatch, got {other:?}"),
    }
    assert_eq!(registry.read_file("checksums.txt"), persisted);
}

#[test]
fn verify_is_idempotent_and_read_only() {
    let registry = TestRegistry::new();
    registry.write_file("agents/a.json", "{}");
    let engine = engine(&registry);
    engine.generate().unwrap();
    let persisted = registry.read_file("checksums.txt");

    for _ in 0..3 {
        assert!(engine.verify().unwrap().is_match());
    }
    assert_eq!(registry.read_file("checksums.txt"), persisted);
}

#[test]
fn trailing_newline_difference_is_formatting_mismatch() {
    let registry = TestRegistry::new();
    registry.write_file("agents/a.json", "{}");
    let engine = engine(&registry);
    engine.generate().unwrap();

    let persisted = registry.read_file("checksums.txt");
    registry.write_file("checksums.txt", persisted.trim_end_matches('\n'));

    match engine.verify().unwrap().outcome {
        VerifyOutcome::Mismatch(drift) => assert!(drift.is_formatting_only()),
        other => panic!("expected mismatch, got {other:?}"),
    }
}

#[test]
fn configured_manifest_inside_a_root_excludes_itself() {
    let registry = TestRegistry::new();
    registry.write_file(
        "cardreg.toml",
        "[checksums]\n\
         manifest = \"meta/registry.sha256sums\"\n\
         exclude_prefixes = [\"schemas/drafts/\"]\n",
    );
    registry.write_file("meta/info.json", "{}");
    registry.write_file("schemas/drafts/wip.json", "{}");
    registry.write_file("schemas/final.json", "{}");
    registry.write_file("agents/node_modules/pkg/index.js", "x");
    registry.write_file("agents/.DS_Store", "junk");

    let engine = engine(&registry);
    engine.generate().unwrap();
    let first = registry.read_file("meta/registry.sha256sums");
    engine.generate().unwrap();

    assert_eq!(registry.read_file("meta/registry.sha256sums"), first);
    let paths: Vec<&str> = first
        .lines()
        .filter_map(|line| line.split_once("  ").map(|(_, p)| p))
        .collect();
    assert_eq!(paths, vec!["meta/info.json", "schemas/final.json"]);
    assert!(engine.verify().unwrap().is_match());
}

// =============================================================================
// Card workflow
// =============================================================================

#[test]
fn rewrite_validate_and_seal_registry() {
    let registry = TestRegistry::new();
    registry.write_json(
        "schemas/v1.0.0/commons/agent.card.base.schema.json",
        &base_schema(),
    );
    registry.write_json("agents/v1.0.0/commons/a.json", &sample_card("a.eth"));
    registry.write_json("agents/v1.0.0/commons/b.json", &sample_card("b.eth"));
    let config = RegistryConfig::load(registry.root()).unwrap();
    let agents = &config.cards.agents_dir;

    let mirrored = mirror_cards(registry.root(), agents, &config.mirror, false).unwrap();
    assert_eq!(mirrored.updated(), 2);
    let reordered = reorder_cards(registry.root(), agents, false).unwrap();
    assert_eq!(reordered.updated(), 2);

    // A second pass is a no-op
    let again = reorder_cards(registry.root(), agents, false).unwrap();
    assert!(again.results.iter().all(|r| r.status == RewriteStatus::Unchanged));

    let validator = CardValidator::new(registry.root(), &config.cards);
    let schema = validator.load_base_schema().unwrap();
    assert!(validator.validate_agents(&schema).unwrap().is_ok());

    let card = registry.read_file("agents/v1.0.0/commons/a.json");
    registry.write_file(
        "checksums/commons/a.sha256",
        &format!("sha256:{}\n", compute_content_checksum(card.as_bytes())),
    );
    let sidecars = SidecarVerifier::new(registry.root(), &config.cards)
        .verify()
        .unwrap();
    assert_eq!(sidecars.results.len(), 1);
    assert_eq!(sidecars.results[0].status, SidecarStatus::Match);

    let engine = ChecksumEngine::new(registry.root(), &config.checksums);
    assert_eq!(engine.generate().unwrap().entries, 3);
    assert!(engine.verify().unwrap().is_match());

    // Rewriting a card after sealing is caught by verify
    registry.write_json("agents/v1.0.0/commons/b.json", &sample_card("b.eth"));
    match engine.verify().unwrap().outcome {
        VerifyOutcome::Mismatch(drift) => {
            assert_eq!(drift.changed, vec!["agents/v1.0.0/commons/b.json".to_string()]);
        }
        other => panic!("expected mismatch, got {other:?}"),
    }
}
