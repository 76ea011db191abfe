//! Shared test fixtures for the cardreg workspace.
//!
//! Dev-dependency only, never published.
//!
//! - [`registry`]: [`TestRegistry`], a temporary registry checkout
//! - [`cards`]: sample Agent Cards and schemas

pub mod cards;
pub mod registry;

pub use registry::TestRegistry;
