//! Assembles the full content set.

use std::path::Path;

use talent_core::TalentRules;
use talent_core::graph::{TalentGraph, TalentTab};

use crate::loaders::{LoadResult, RulesLoader, TabLoader};

/// Builds the talent graph and rules, either from the embedded default
/// content set or from a content directory on disk.
pub struct ContentFactory;

impl ContentFactory {
    /// Loads the embedded default content set.
    pub fn load_defaults() -> LoadResult<(TalentGraph, TalentRules)> {
        let mut tabs = Vec::new();

        for (name, source) in [
            ("warfare", include_str!("../../data/tabs/warfare.ron")),
            ("tactics", include_str!("../../data/tabs/tactics.ron")),
            ("heritage", include_str!("../../data/tabs/heritage.ron")),
            ("fieldcraft", include_str!("../../data/tabs/fieldcraft.ron")),
        ] {
            let tab = TabLoader::parse(source)
                .map_err(|e| anyhow::anyhow!("Failed to parse {name}.ron: {e}"))?;
            tabs.push(tab);
        }

        let graph = Self::build_graph(tabs)?;
        let rules = RulesLoader::parse(include_str!("../../data/rules.toml"))?;
        Ok((graph, rules))
    }

    /// Loads `tabs/*.ron` and `rules.toml` from a content directory.
    pub fn load_from(dir: &Path) -> LoadResult<(TalentGraph, TalentRules)> {
        let mut tabs = Vec::new();
        let tabs_dir = dir.join("tabs");

        let mut entries: Vec<_> = std::fs::read_dir(&tabs_dir)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", tabs_dir.display(), e))?
            .collect::<Result<_, _>>()?;
        // Directory order is platform-dependent; sort for reproducible loads.
        entries.sort_by_key(|entry| entry.path());

        for entry in entries {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "ron") {
                tabs.push(TabLoader::load(&path)?);
            }
        }

        let graph = Self::build_graph(tabs)?;
        let rules = RulesLoader::load(&dir.join("rules.toml"))?;
        Ok((graph, rules))
    }

    fn build_graph(tabs: Vec<TalentTab>) -> LoadResult<TalentGraph> {
        TalentGraph::new(tabs).map_err(|e| anyhow::anyhow!("Invalid talent content: {}", e))
    }
}
