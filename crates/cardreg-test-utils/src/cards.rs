//! Sample Agent Cards and schemas.

use serde_json::{Value, json};

pub const IPFS_ROOT: &str = "ipfs://bafybeigvf6nkzws7dblos74dqqjkguwkrwn4a2c27ieygoxmgofyzdkz6m";
pub const HTTP_ROOT: &str = "https://commandlayer.org/schemas/v1.0.0";

/// A minimal base schema for Agent Cards.
pub fn base_schema() -> Value {
    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "$id": "https://commandlayer.org/schemas/v1.0.0/commons/agent.card.base.schema.json",
        "type": "object",
        "required": ["id", "slug", "version", "schemas"],
        "properties": {
            "id": { "type": "string", "minLength": 1 },
            "slug": { "type": "string", "pattern": "^[a-z0-9.-]+$" },
            "version": { "type": "string" },
            "schemas": {
                "type": "object",
                "required": ["request", "receipt"],
                "properties": {
                    "request": { "type": "string" },
                    "receipt": { "type": "string" }
                }
            }
        }
    })
}

/// A card that passes [`base_schema`], with keys in a scrambled order.
pub fn sample_card(slug: &str) -> Value {
    json!({
        "version": "1.0.0",
        "schemas": {
            "request": format!("{IPFS_ROOT}/commons/{slug}/request.schema.json"),
            "receipt": format!("{IPFS_ROOT}/commons/{slug}/receipt.schema.json")
        },
        "x_extra": true,
        "slug": slug,
        "id": format!("did:web:{slug}"),
        "$schema": "https://commandlayer.org/schemas/v1.0.0/commons/agent.card.base.schema.json"
    })
}
