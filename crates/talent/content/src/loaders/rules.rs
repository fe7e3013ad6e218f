//! Point-budget rules loader.

use std::path::Path;

use talent_core::TalentRules;

use crate::loaders::{LoadResult, read_file};

/// Loader for point-budget rules from TOML files.
pub struct RulesLoader;

impl RulesLoader {
    /// Parses rules from TOML text.
    pub fn parse(source: &str) -> LoadResult<TalentRules> {
        let rules: TalentRules = toml::from_str(source)
            .map_err(|e| anyhow::anyhow!("Failed to parse rules TOML: {}", e))?;
        Ok(rules)
    }

    /// Loads rules from a TOML file.
    pub fn load(path: &Path) -> LoadResult<TalentRules> {
        let content = read_file(path)?;
        Self::parse(&content)
    }
}
