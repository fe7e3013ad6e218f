//! The learn-legality check.
//!
//! [`check_learn`] is a pure predicate over the character state, the graph
//! and the budget snapshot: no mutation, no I/O, safe to call repeatedly and
//! concurrently for read-only previews. [`can_learn`] is the boolean facade
//! over the same evaluation.

use crate::budget::PointSnapshot;
use crate::engine::TalentError;
use crate::env::{GraphOracle, TalentEnv};
use crate::graph::{Talent, TalentTab};
use crate::state::{CharacterSpec, CharacterState};
use crate::types::{PrereqPolicy, SpellId, TabId};

/// Whether the active spec may learn one more rank of `spell` in `tab`.
pub fn can_learn(
    state: &CharacterState,
    level: u8,
    tab: TabId,
    spell: SpellId,
    env: &TalentEnv<'_>,
) -> bool {
    check_learn(state, level, tab, spell, env).is_ok()
}

/// Full legality evaluation with a distinct reason code per rejection.
///
/// The rank cap is not part of this check; the mutation path enforces it.
pub fn check_learn(
    state: &CharacterState,
    level: u8,
    tab_id: TabId,
    spell_id: SpellId,
    env: &TalentEnv<'_>,
) -> Result<(), TalentError> {
    let graph = env.graph()?;
    let rules = env.rules()?;

    let tab = graph.tab(tab_id).ok_or(TalentError::UnknownTab(tab_id))?;
    let spec = state.active_spec().ok_or(TalentError::NoActiveSpec)?;

    let budget = PointSnapshot::resolve(state, spec.id, tab.point_type, rules);
    if budget.available == 0 {
        return Err(TalentError::NoPointsAvailable);
    }

    let talent = tab.talent(spell_id).ok_or(TalentError::UnknownTalent {
        tab: tab_id,
        spell: spell_id,
    })?;

    if talent.required_level > level {
        return Err(TalentError::LevelTooLow {
            required: talent.required_level,
        });
    }

    let spent_in_tab = spec.points_in_tab(tab_id);
    if talent.tab_point_req > spent_in_tab {
        return Err(TalentError::TabPointsRequired {
            required: talent.tab_point_req,
        });
    }

    if budget.available < talent.rank_cost {
        return Err(TalentError::InsufficientPoints {
            cost: talent.rank_cost,
            available: budget.available,
        });
    }

    if !budget.unlimited_tab() && spent_in_tab + talent.rank_cost > budget.max_per_tab {
        return Err(TalentError::TabBudgetExceeded {
            max: budget.max_per_tab,
        });
    }

    check_prereqs(graph, spec, tab, talent)
}

/// Prerequisite-combination evaluation.
///
/// Same-tab and cross-tab edges are deliberately asymmetric: a satisfied
/// same-tab edge arms the any-satisfied flag while an unsatisfied one is
/// silently skipped, and the flag staying clear adds exactly one unmet
/// increment after the scan. Cross-tab edges count individually. ANY policy
/// compares the unmet count against the number of evaluated edges; rank-0
/// sentinel and dangling edges are absent from both sides of that
/// comparison.
fn check_prereqs(
    graph: &dyn GraphOracle,
    spec: &CharacterSpec,
    tab: &TalentTab,
    talent: &Talent,
) -> Result<(), TalentError> {
    let mut unmet = 0usize;
    let mut considered = 0usize;
    let mut any_in_tab = false;

    for edge in &talent.prereqs {
        // Authoring sentinel: a zero required rank is "no requirement".
        if edge.required_rank == 0 {
            continue;
        }

        // Dangling or rank-less references are malformed content.
        let Some(target) = graph.talent(edge.tab, edge.talent) else {
            continue;
        };
        if target.number_of_ranks == 0 {
            continue;
        }
        considered += 1;

        if edge.tab == tab.id {
            if spec.rank_of(tab.id, edge.talent) >= edge.required_rank {
                any_in_tab = true;
            }
        } else if spec.rank_of(edge.tab, edge.talent) < edge.required_rank {
            unmet += 1;
        }
    }

    if !any_in_tab {
        unmet += 1;
    }

    if unmet > 0 {
        match talent.prereq_policy {
            PrereqPolicy::All => return Err(TalentError::PrerequisitesUnmet(talent.spell_id)),
            PrereqPolicy::Any if unmet == considered => {
                return Err(TalentError::PrerequisitesUnmet(talent.spell_id));
            }
            PrereqPolicy::Any => {}
        }
    }

    Ok(())
}
