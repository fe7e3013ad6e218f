//! Data-driven talent content definitions and loaders.
//!
//! This crate houses the static content set and provides loaders for
//! RON/TOML data files:
//! - Talent tab definitions (data-driven via RON)
//! - Point-budget rules (data-driven via TOML)
//!
//! Content is loaded once at startup into the immutable
//! [`talent_core::TalentGraph`] arena and never appears in character state.
//! A load failure is fatal: nothing here is recoverable per-request.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ContentFactory, RulesLoader, TabDefinition, TabLoader};
