//! Content loaders for reading talent data from files.
//!
//! Loaders convert RON tab definitions and the TOML rules file into the
//! core graph arena. Everything fails fast: a malformed definition aborts
//! startup instead of surfacing per-request.

pub mod factory;
pub mod rules;
pub mod tabs;

pub use factory::ContentFactory;
pub use rules::RulesLoader;
pub use tabs::{TabDefinition, TabLoader};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
