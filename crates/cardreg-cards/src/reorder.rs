//! Canonical top-level key order for Agent Cards

use std::path::Path;

use serde_json::{Map, Value};

use crate::error::Result;
use crate::rewrite::{CardRewriter, RewriteReport, Transform};

/// Keys in the order they should appear; anything else follows, in its
/// original order.
pub const CANONICAL_ORDER: [&str; 21] = [
    "$schema",
    "$id",
    "id",
    "slug",
    "display_name",
    "description",
    "owner",
    "ens",
    "version",
    "status",
    "class",
    "implements",
    "schemas",
    "schemas_mirror",
    "entry",
    "capabilities",
    "meta",
    "networks",
    "license",
    "created_at",
    "updated_at",
];

/// Reorder the top-level keys of a card. Nested objects are untouched.
pub fn reorder_keys(card: Map<String, Value>) -> Map<String, Value> {
    let mut rest: Vec<(String, Value)> = card.into_iter().collect();
    let mut ordered = Map::with_capacity(rest.len());

    for key in CANONICAL_ORDER {
        if let Some(pos) = rest.iter().position(|(k, _)| k == key) {
            let (k, v) = rest.remove(pos);
            ordered.insert(k, v);
        }
    }
    ordered.extend(rest);
    ordered
}

/// Reorder every card under `agents_dir`.
pub fn reorder_cards(repo_root: &Path, agents_dir: &str, dry_run: bool) -> Result<RewriteReport> {
    CardRewriter::new(repo_root, agents_dir)
        .dry_run(dry_run)
        .run(|card| Transform::Apply(reorder_keys(card)))
}
