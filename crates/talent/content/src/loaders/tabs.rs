//! Talent tab loader.
//!
//! Tab definitions live in RON, one file per tab. Deserialization reuses the
//! core [`Talent`] and [`TabHeader`] types directly; only the indexed arena
//! is built here.

use std::path::Path;

use talent_core::graph::{TabHeader, Talent, TalentTab};
use talent_core::types::NodeKind;

use crate::loaders::{LoadResult, read_file};

/// On-disk shape of one talent tab.
#[derive(Debug, serde::Deserialize)]
pub struct TabDefinition {
    pub header: TabHeader,
    #[serde(default)]
    pub talents: Vec<Talent>,
}

/// Loader for RON tab definition files.
pub struct TabLoader;

impl TabLoader {
    /// Parses one tab definition from RON text.
    pub fn parse(source: &str) -> LoadResult<TalentTab> {
        let definition: TabDefinition =
            ron::from_str(source).map_err(|e| anyhow::anyhow!("Failed to parse tab RON: {}", e))?;
        Self::build(definition)
    }

    /// Loads one tab definition from a RON file.
    pub fn load(path: &Path) -> LoadResult<TalentTab> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))
    }

    fn build(definition: TabDefinition) -> LoadResult<TalentTab> {
        for talent in &definition.talents {
            match talent.node_kind {
                NodeKind::Choice => {
                    if talent.choices.is_empty() {
                        anyhow::bail!(
                            "choice node {} in tab {} has no alternatives",
                            talent.spell_id,
                            definition.header.id
                        );
                    }
                }
                NodeKind::Rank => {
                    for rank in 1..=talent.number_of_ranks {
                        if talent.rank_spell(rank).is_none() {
                            anyhow::bail!(
                                "talent {} in tab {} is missing the spell for rank {}",
                                talent.spell_id,
                                definition.header.id,
                                rank
                            );
                        }
                    }
                }
            }

            // Dangling references are tolerated at runtime; still worth a
            // heads-up while the content is being authored.
            for edge in &talent.prereqs {
                if edge.required_rank > 0
                    && edge.tab == definition.header.id
                    && !definition
                        .talents
                        .iter()
                        .any(|other| other.spell_id == edge.talent)
                {
                    tracing::warn!(
                        tab = %definition.header.id,
                        talent = %talent.spell_id,
                        target = %edge.talent,
                        "prerequisite references a talent missing from its tab"
                    );
                }
            }
        }

        Ok(TalentTab::new(definition.header, definition.talents))
    }
}
