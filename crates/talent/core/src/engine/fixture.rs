//! Shared content fixture for engine tests.

use std::collections::BTreeMap;

use crate::budget::PointLimit;
use crate::graph::{ChoiceOption, PrereqEdge, TabHeader, Talent, TalentGraph, TalentTab};
use crate::rules::TalentRules;
use crate::state::CharacterState;
use crate::types::{
    CharacterId, CharacterPointType, NodeKind, PrereqPolicy, SpellId, TabId,
};

pub const WARFARE: TabId = TabId(1);
pub const TACTICS: TabId = TabId(2);
pub const HERITAGE: TabId = TabId(3);

pub const STRIKE: SpellId = SpellId(100);
pub const WARCRY: SpellId = SpellId(110);
pub const RAMPAGE: SpellId = SpellId(120);
pub const BULWARK: SpellId = SpellId(140);
pub const OVERPOWER: SpellId = SpellId(150);
pub const JUGGERNAUT: SpellId = SpellId(160);
pub const SKIRMISHER: SpellId = SpellId(170);
pub const SENTINEL: SpellId = SpellId(180);
pub const VETERAN: SpellId = SpellId(190);

pub const FEINT: SpellId = SpellId(200);
pub const AMBUSH: SpellId = SpellId(210);

pub const HARDINESS: SpellId = SpellId(300);

pub const BULWARK_WALL: SpellId = SpellId(141);
pub const BULWARK_SPIKES: SpellId = SpellId(142);
pub const BULWARK_WARD: SpellId = SpellId(143);

fn talent(spell: SpellId, ranks: &[(u8, u32)]) -> Talent {
    Talent {
        spell_id: spell,
        column: 0,
        row: 0,
        rank_cost: 1,
        required_level: 1,
        tab_point_req: 0,
        number_of_ranks: ranks.len() as u8,
        prereq_policy: PrereqPolicy::Any,
        node_kind: NodeKind::Rank,
        ranks: ranks
            .iter()
            .map(|&(rank, spell)| (rank, SpellId(spell)))
            .collect(),
        unlearn_spells: Vec::new(),
        prereqs: Vec::new(),
        choices: Vec::new(),
    }
}

fn edge(talent: SpellId, tab: TabId, required_rank: u8) -> PrereqEdge {
    PrereqEdge {
        talent,
        tab,
        required_rank,
    }
}

fn header(id: TabId, name: &str, point_type: CharacterPointType, tab_index: u16) -> TabHeader {
    TabHeader {
        id,
        name: name.to_owned(),
        icon: 0,
        background: String::new(),
        description: String::new(),
        role: 0,
        spell_string: String::new(),
        point_type,
        tab_index,
    }
}

/// Builds the test graph and default rules.
pub fn content() -> (TalentGraph, TalentRules) {
    let warfare = TalentTab::new(
        header(WARFARE, "Warfare", CharacterPointType::Class, 0),
        vec![
            talent(STRIKE, &[(1, 1001), (2, 1002), (3, 1003)]),
            Talent {
                required_level: 20,
                unlearn_spells: vec![SpellId(902)],
                ..talent(WARCRY, &[(1, 1101)])
            },
            Talent {
                rank_cost: 2,
                tab_point_req: 5,
                ..talent(RAMPAGE, &[(1, 1201), (2, 1202)])
            },
            Talent {
                node_kind: NodeKind::Choice,
                choices: vec![
                    ChoiceOption {
                        spell_id: BULWARK_WALL,
                    },
                    ChoiceOption {
                        spell_id: BULWARK_SPIKES,
                    },
                    ChoiceOption {
                        spell_id: BULWARK_WARD,
                    },
                ],
                ..talent(BULWARK, &[(1, 1401)])
            },
            Talent {
                prereq_policy: PrereqPolicy::All,
                prereqs: vec![
                    edge(STRIKE, WARFARE, 1),
                    edge(FEINT, TACTICS, 1),
                    edge(AMBUSH, TACTICS, 1),
                ],
                ..talent(OVERPOWER, &[(1, 1501)])
            },
            Talent {
                prereq_policy: PrereqPolicy::All,
                prereqs: vec![edge(STRIKE, WARFARE, 1), edge(RAMPAGE, WARFARE, 2)],
                ..talent(JUGGERNAUT, &[(1, 1601)])
            },
            Talent {
                prereqs: vec![
                    edge(STRIKE, WARFARE, 1),
                    edge(FEINT, TACTICS, 1),
                    edge(AMBUSH, TACTICS, 1),
                ],
                ..talent(SKIRMISHER, &[(1, 1701)])
            },
            Talent {
                prereqs: vec![edge(STRIKE, WARFARE, 0)],
                ..talent(SENTINEL, &[(1, 1801)])
            },
            Talent {
                prereqs: vec![edge(SpellId(9999), WARFARE, 1)],
                ..talent(VETERAN, &[(1, 1901)])
            },
        ],
    );

    let tactics = TalentTab::new(
        header(TACTICS, "Tactics", CharacterPointType::Talent, 0),
        vec![talent(FEINT, &[(1, 2001)]), talent(AMBUSH, &[(1, 2101)])],
    );

    let heritage = TalentTab::new(
        header(HERITAGE, "Heritage", CharacterPointType::Racial, 0),
        vec![talent(HARDINESS, &[(1, 3001)])],
    );

    let graph = TalentGraph::new(vec![warfare, tactics, heritage]).expect("fixture graph");

    let mut limits = BTreeMap::new();
    limits.insert(
        CharacterPointType::Racial,
        PointLimit {
            max_per_tab: 8,
            hard_cap: 8,
        },
    );
    let rules = TalentRules {
        limits,
        ..TalentRules::default()
    };

    (graph, rules)
}

/// A character with one active spec and the given point grants.
pub fn character(grants: &[(CharacterPointType, u32)]) -> CharacterState {
    let mut state = CharacterState::new(CharacterId(7));
    state.add_spec_slot(WARFARE);
    for &(point_type, amount) in grants {
        state.grant_points(point_type, amount, 0);
    }
    state
}

/// Test-only shortcut: record a rank and tab spend directly, bypassing the
/// engine, to stage prerequisite scenarios.
pub fn force_spend(
    state: &mut CharacterState,
    tab: TabId,
    spell: SpellId,
    rank: u8,
    points: u32,
) {
    let spec = state.active_spec_mut().expect("fixture spec");
    spec.talent_mut(tab, spell, NodeKind::Rank).current_rank = rank;
    *spec.points_spent.entry(tab).or_insert(0) += points;
}
