//! Agent Card validation and in-place rewriting
//!
//! - [`validate`]: cards and schema examples checked through a
//!   [`SchemaValidator`]
//! - [`reorder`]: canonical top-level key order
//! - [`mirror`]: HTTP mirrors for IPFS schema URLs
//!
//! The checksum manifest treats cards as opaque bytes; this crate is the only
//! place that parses them.

pub mod discover;
pub mod error;
pub mod mirror;
pub mod reorder;
pub mod rewrite;
pub mod validate;

pub use error::{Error, Result};
pub use mirror::{MirrorSkip, mirror_cards, mirror_schemas};
pub use reorder::{CANONICAL_ORDER, reorder_cards, reorder_keys};
pub use rewrite::{CardRewriter, RewriteReport, RewriteResult, RewriteStatus, Transform};
pub use validate::{
    CardCheck, CardStatus, CardValidator, JsonSchemaValidator, SchemaValidator, ValidationReport,
    Violation,
};
