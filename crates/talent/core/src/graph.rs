//! Immutable talent content arena.
//!
//! Tabs and talents are loaded once at startup and shared read-only by every
//! player afterwards. Talents live in an explicitly ordered arena (`Vec` plus
//! id→index map) so the wire encoding iterates in a stable, reproducible
//! order; nothing on the wire path touches an unordered map.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::types::{CharacterPointType, NodeKind, PrereqPolicy, SpellId, TabId};

/// A prerequisite edge: the referenced talent must be at `required_rank` or
/// higher before the owning talent becomes learnable.
///
/// `required_rank == 0` is a content-authoring sentinel for "no requirement"
/// and is skipped wherever edges are evaluated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrereqEdge {
    /// Talent the edge points at.
    pub talent: SpellId,
    /// Tab that talent lives in; differs from the owning tab for cross-tab
    /// requirements.
    pub tab: TabId,
    /// Minimum rank required in the referenced talent.
    pub required_rank: u8,
}

/// One alternative of a choice node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChoiceOption {
    pub spell_id: SpellId,
}

/// Immutable definition of a single talent node.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Talent {
    /// Base spell id; also the talent's key within its tab.
    pub spell_id: SpellId,
    /// Grid column in the tab layout.
    pub column: u8,
    /// Grid row in the tab layout.
    pub row: u8,
    /// Points consumed per rank.
    pub rank_cost: u32,
    /// Minimum character level.
    pub required_level: u8,
    /// Points that must already be spent in this tab.
    pub tab_point_req: u32,
    /// Total number of ranks.
    pub number_of_ranks: u8,
    /// How prerequisite edges combine.
    #[cfg_attr(feature = "serde", serde(default))]
    pub prereq_policy: PrereqPolicy,
    /// Linear-rank or choice node.
    #[cfg_attr(feature = "serde", serde(default))]
    pub node_kind: NodeKind,
    /// Spell granted at each rank, keyed from rank 1.
    #[cfg_attr(feature = "serde", serde(default))]
    pub ranks: BTreeMap<u8, SpellId>,
    /// Spells removed from the character whenever any rank is learned.
    #[cfg_attr(feature = "serde", serde(default))]
    pub unlearn_spells: Vec<SpellId>,
    /// Prerequisite edges.
    #[cfg_attr(feature = "serde", serde(default))]
    pub prereqs: Vec<PrereqEdge>,
    /// Alternatives of a choice node; empty for linear-rank talents.
    #[cfg_attr(feature = "serde", serde(default))]
    pub choices: Vec<ChoiceOption>,
}

impl Talent {
    /// Spell granted at `rank`, if content defines one.
    pub fn rank_spell(&self, rank: u8) -> Option<SpellId> {
        self.ranks.get(&rank).copied()
    }

    /// Whether `spell` is one of this node's choice alternatives.
    pub fn has_choice(&self, spell: SpellId) -> bool {
        self.choices.iter().any(|choice| choice.spell_id == spell)
    }
}

/// One page of a talent tree with its own point budget.
///
/// Talent storage is ordered: iteration yields talents in content-declared
/// order, which the rank-snapshot encoding depends on.
#[derive(Clone, Debug)]
pub struct TalentTab {
    pub id: TabId,
    pub name: String,
    pub icon: u32,
    pub background: String,
    pub description: String,
    pub role: u8,
    pub spell_string: String,
    pub point_type: CharacterPointType,
    pub tab_index: u16,
    talents: Vec<Talent>,
    index: HashMap<SpellId, usize>,
}

/// Tab metadata without the talent list, used when constructing a tab.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TabHeader {
    pub id: TabId,
    pub name: String,
    pub icon: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub background: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub role: u8,
    #[cfg_attr(feature = "serde", serde(default))]
    pub spell_string: String,
    pub point_type: CharacterPointType,
    pub tab_index: u16,
}

impl TalentTab {
    pub fn new(header: TabHeader, talents: Vec<Talent>) -> Self {
        let index = talents
            .iter()
            .enumerate()
            .map(|(position, talent)| (talent.spell_id, position))
            .collect();

        Self {
            id: header.id,
            name: header.name,
            icon: header.icon,
            background: header.background,
            description: header.description,
            role: header.role,
            spell_string: header.spell_string,
            point_type: header.point_type,
            tab_index: header.tab_index,
            talents,
            index,
        }
    }

    /// Looks up a talent by its base spell id.
    pub fn talent(&self, spell: SpellId) -> Option<&Talent> {
        self.index.get(&spell).map(|&position| &self.talents[position])
    }

    /// Talents in content-declared order.
    pub fn talents(&self) -> &[Talent] {
        &self.talents
    }

    pub fn len(&self) -> usize {
        self.talents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.talents.is_empty()
    }
}

/// Error raised while assembling the graph arena.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("duplicate talent tab id {0}")]
    DuplicateTab(TabId),

    #[error("duplicate talent {spell} in tab {tab}")]
    DuplicateTalent { tab: TabId, spell: SpellId },
}

/// The load-once talent graph: every tab of every tree, indexed by id and
/// grouped by point category.
#[derive(Clone, Debug, Default)]
pub struct TalentGraph {
    tabs: Vec<TalentTab>,
    by_id: HashMap<TabId, usize>,
    by_type: BTreeMap<CharacterPointType, Vec<usize>>,
}

impl TalentGraph {
    /// Builds the arena. Tabs within a category are ordered by `tab_index`.
    pub fn new(mut tabs: Vec<TalentTab>) -> Result<Self, GraphError> {
        tabs.sort_by_key(|tab| (tab.point_type, tab.tab_index));

        let mut by_id = HashMap::with_capacity(tabs.len());
        let mut by_type: BTreeMap<CharacterPointType, Vec<usize>> = BTreeMap::new();

        for (position, tab) in tabs.iter().enumerate() {
            if by_id.insert(tab.id, position).is_some() {
                return Err(GraphError::DuplicateTab(tab.id));
            }

            let mut seen = HashSet::with_capacity(tab.len());
            for talent in tab.talents() {
                if !seen.insert(talent.spell_id) {
                    return Err(GraphError::DuplicateTalent {
                        tab: tab.id,
                        spell: talent.spell_id,
                    });
                }
            }

            by_type.entry(tab.point_type).or_default().push(position);
        }

        Ok(Self {
            tabs,
            by_id,
            by_type,
        })
    }

    pub fn tab(&self, id: TabId) -> Option<&TalentTab> {
        self.by_id.get(&id).map(|&position| &self.tabs[position])
    }

    pub fn talent(&self, tab: TabId, spell: SpellId) -> Option<&Talent> {
        self.tab(tab).and_then(|tab| tab.talent(spell))
    }

    /// Tabs of one point category, ordered by tab index.
    pub fn tabs_for(&self, point_type: CharacterPointType) -> Vec<&TalentTab> {
        self.by_type
            .get(&point_type)
            .map(|positions| positions.iter().map(|&p| &self.tabs[p]).collect())
            .unwrap_or_default()
    }

    /// Every tab in the arena, category-then-index order.
    pub fn tabs(&self) -> &[TalentTab] {
        &self.tabs
    }
}

impl crate::env::GraphOracle for TalentGraph {
    fn tab(&self, id: TabId) -> Option<&TalentTab> {
        TalentGraph::tab(self, id)
    }

    fn talent(&self, tab: TabId, spell: SpellId) -> Option<&Talent> {
        TalentGraph::talent(self, tab, spell)
    }

    fn tabs_for(&self, point_type: CharacterPointType) -> Vec<&TalentTab> {
        TalentGraph::tabs_for(self, point_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(id: u32, point_type: CharacterPointType, tab_index: u16) -> TabHeader {
        TabHeader {
            id: TabId(id),
            name: format!("tab-{id}"),
            icon: 0,
            background: String::new(),
            description: String::new(),
            role: 0,
            spell_string: String::new(),
            point_type,
            tab_index,
        }
    }

    #[test]
    fn tabs_for_orders_by_tab_index() {
        let graph = TalentGraph::new(vec![
            TalentTab::new(header(2, CharacterPointType::Class, 1), Vec::new()),
            TalentTab::new(header(1, CharacterPointType::Class, 0), Vec::new()),
            TalentTab::new(header(3, CharacterPointType::Racial, 0), Vec::new()),
        ])
        .unwrap();

        let class_tabs: Vec<TabId> = graph
            .tabs_for(CharacterPointType::Class)
            .iter()
            .map(|tab| tab.id)
            .collect();
        assert_eq!(class_tabs, vec![TabId(1), TabId(2)]);
        assert_eq!(graph.tabs_for(CharacterPointType::Talent).len(), 0);
    }

    #[test]
    fn duplicate_tab_id_is_rejected() {
        let result = TalentGraph::new(vec![
            TalentTab::new(header(7, CharacterPointType::Class, 0), Vec::new()),
            TalentTab::new(header(7, CharacterPointType::Talent, 0), Vec::new()),
        ]);
        assert_eq!(result.unwrap_err(), GraphError::DuplicateTab(TabId(7)));
    }
}
