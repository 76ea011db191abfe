//! HTTP mirrors for content-addressed schema URLs
//!
//! Cards reference their request/receipt schemas by IPFS URL. Mirroring adds
//! `schemas_mirror` with the same URLs rewritten onto the HTTP root, so
//! clients without an IPFS gateway can still resolve them.

use std::path::Path;

use cardreg_core::MirrorConfig;
use serde_json::{Map, Value, json};

use crate::error::Result;
use crate::rewrite::{CardRewriter, RewriteReport, Transform};

/// Why a card could not be mirrored
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MirrorSkip {
    /// `schemas.request` or `schemas.receipt` is absent or empty
    MissingSchemas,
    /// A schema URL does not live under the IPFS root
    NonStandard,
}

impl std::fmt::Display for MirrorSkip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingSchemas => write!(f, "missing schemas.request or schemas.receipt"),
            Self::NonStandard => write!(f, "non-standard IPFS schema URLs, leaving as-is"),
        }
    }
}

/// Compute the HTTP mirror for one schema URL.
///
/// Only the first `<ipfs_root>/commons` occurrence is rewritten.
pub fn mirror_url(url: &str, config: &MirrorConfig) -> String {
    let from = format!("{}/commons", config.ipfs_root);
    let to = format!("{}/commons", config.http_root);
    url.replacen(&from, &to, 1)
}

/// Set `schemas_mirror` on a card.
///
/// An existing `schemas_mirror` keeps its position; a new one is appended.
pub fn mirror_schemas(card: &mut Map<String, Value>, config: &MirrorConfig) -> std::result::Result<(), MirrorSkip> {
    let schema_url = |name: &str| {
        card.get("schemas")
            .and_then(|s| s.get(name))
            .and_then(Value::as_str)
            .filter(|url| !url.is_empty())
            .map(str::to_string)
    };
    let (Some(request), Some(receipt)) = (schema_url("request"), schema_url("receipt")) else {
        return Err(MirrorSkip::MissingSchemas);
    };
    if !request.starts_with(&config.ipfs_root) || !receipt.starts_with(&config.ipfs_root) {
        return Err(MirrorSkip::NonStandard);
    }

    card.insert(
        "schemas_mirror".to_string(),
        json!({
            "request": mirror_url(&request, config),
            "receipt": mirror_url(&receipt, config),
        }),
    );
    Ok(())
}

/// Mirror schema URLs for every card under `agents_dir`.
pub fn mirror_cards(
    repo_root: &Path,
    agents_dir: &str,
    config: &MirrorConfig,
    dry_run: bool,
) -> Result<RewriteReport> {
    CardRewriter::new(repo_root, agents_dir)
        .dry_run(dry_run)
        .run(|mut card| match mirror_schemas(&mut card, config) {
            Ok(()) => Transform::Apply(card),
            Err(skip) => Transform::Skip(skip.to_string()),
        })
}
