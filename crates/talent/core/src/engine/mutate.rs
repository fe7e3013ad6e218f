//! Accepted talent transitions.
//!
//! Each operation runs the complete legality evaluation first and only then
//! touches the character state, so a rejection can never leave a partial
//! point deduction behind. The returned outcomes carry the spell delta for
//! the host game engine; nothing here talks to the player directly.

use crate::engine::TalentError;
use crate::engine::legality::check_learn;
use crate::env::TalentEnv;
use crate::state::CharacterState;
use crate::types::{NodeKind, SpellId, TabId};

/// Spell delta of one accepted rank change.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LearnOutcome {
    pub tab_id: TabId,
    pub spell_id: SpellId,
    pub new_rank: u8,
    /// Spell the character gains, when the rank maps to one.
    pub learn_spell: Option<SpellId>,
    /// Spells the character loses: the replaced rank or alternative, plus
    /// the talent's unlearn list.
    pub remove_spells: Vec<SpellId>,
}

/// Result of a full tab respec.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResetOutcome {
    pub tab_id: TabId,
    /// Points returned to the spec's pool.
    pub refunded: u32,
    pub remove_spells: Vec<SpellId>,
}

/// Spells a character should hold given the talents currently learned.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KnownSpellPlan {
    pub learn: Vec<SpellId>,
    pub remove: Vec<SpellId>,
}

/// Learns one rank of a linear talent.
pub fn learn(
    state: &mut CharacterState,
    level: u8,
    tab_id: TabId,
    spell_id: SpellId,
    env: &TalentEnv<'_>,
) -> Result<LearnOutcome, TalentError> {
    check_learn(state, level, tab_id, spell_id, env)?;

    let graph = env.graph()?;
    let tab = graph.tab(tab_id).ok_or(TalentError::UnknownTab(tab_id))?;
    let talent = tab.talent(spell_id).ok_or(TalentError::UnknownTalent {
        tab: tab_id,
        spell: spell_id,
    })?;
    if talent.node_kind == NodeKind::Choice {
        return Err(TalentError::ChoiceRequired(spell_id));
    }

    let (spec_id, current) = {
        let spec = state.active_spec().ok_or(TalentError::NoActiveSpec)?;
        (spec.id, spec.rank_of(tab_id, spell_id))
    };
    if current >= talent.number_of_ranks {
        return Err(TalentError::RankCapReached(spell_id));
    }

    let new_rank = current + 1;
    let mut remove_spells = Vec::new();
    if let Some(previous) = talent.rank_spell(current) {
        remove_spells.push(previous);
    }
    remove_spells.extend(talent.unlearn_spells.iter().copied());

    let cost = talent.rank_cost;
    let point_type = tab.point_type;
    let learn_spell = talent.rank_spell(new_rank);
    let node_kind = talent.node_kind;

    let spec = state.active_spec_mut().ok_or(TalentError::NoActiveSpec)?;
    spec.talent_mut(tab_id, spell_id, node_kind).current_rank = new_rank;
    *spec.points_spent.entry(tab_id).or_insert(0) += cost;
    state.spend(spec_id, point_type, cost);

    Ok(LearnOutcome {
        tab_id,
        spell_id,
        new_rank,
        learn_spell,
        remove_spells,
    })
}

/// Learns or re-selects a choice node.
///
/// A fresh selection pays the node's rank cost; re-selecting a learned node
/// swaps the alternative without spending again. Selecting the alternative
/// already active is a no-op with an empty delta.
pub fn choose(
    state: &mut CharacterState,
    level: u8,
    tab_id: TabId,
    spell_id: SpellId,
    choice: SpellId,
    env: &TalentEnv<'_>,
) -> Result<LearnOutcome, TalentError> {
    let graph = env.graph()?;
    let tab = graph.tab(tab_id).ok_or(TalentError::UnknownTab(tab_id))?;
    let talent = tab.talent(spell_id).ok_or(TalentError::UnknownTalent {
        tab: tab_id,
        spell: spell_id,
    })?;
    if talent.node_kind != NodeKind::Choice {
        return Err(TalentError::NotAChoiceNode(spell_id));
    }
    if !talent.has_choice(choice) {
        return Err(TalentError::InvalidChoice {
            node: spell_id,
            choice,
        });
    }

    let (spec_id, current, previous) = {
        let spec = state.active_spec().ok_or(TalentError::NoActiveSpec)?;
        (
            spec.id,
            spec.rank_of(tab_id, spell_id),
            spec.choices.get(&spell_id).copied(),
        )
    };

    if current == 0 {
        check_learn(state, level, tab_id, spell_id, env)?;

        let cost = talent.rank_cost;
        let point_type = tab.point_type;
        let remove_spells = talent.unlearn_spells.clone();

        let spec = state.active_spec_mut().ok_or(TalentError::NoActiveSpec)?;
        spec.talent_mut(tab_id, spell_id, NodeKind::Choice).current_rank = 1;
        *spec.points_spent.entry(tab_id).or_insert(0) += cost;
        spec.choices.insert(spell_id, choice);
        state.spend(spec_id, point_type, cost);

        return Ok(LearnOutcome {
            tab_id,
            spell_id,
            new_rank: 1,
            learn_spell: Some(choice),
            remove_spells,
        });
    }

    if previous == Some(choice) {
        return Ok(LearnOutcome {
            tab_id,
            spell_id,
            new_rank: current,
            learn_spell: None,
            remove_spells: Vec::new(),
        });
    }

    let spec = state.active_spec_mut().ok_or(TalentError::NoActiveSpec)?;
    spec.choices.insert(spell_id, choice);

    Ok(LearnOutcome {
        tab_id,
        spell_id,
        new_rank: current,
        learn_spell: Some(choice),
        remove_spells: previous.into_iter().collect(),
    })
}

/// Removes one rank, refunding its cost.
///
/// Rejected while another learned talent still requires ranks in the target,
/// so learned talents always satisfy their own prerequisites.
pub fn unlearn(
    state: &mut CharacterState,
    tab_id: TabId,
    spell_id: SpellId,
    env: &TalentEnv<'_>,
) -> Result<LearnOutcome, TalentError> {
    let graph = env.graph()?;
    let tab = graph.tab(tab_id).ok_or(TalentError::UnknownTab(tab_id))?;
    let talent = tab.talent(spell_id).ok_or(TalentError::UnknownTalent {
        tab: tab_id,
        spell: spell_id,
    })?;

    let (spec_id, current, chosen) = {
        let spec = state.active_spec().ok_or(TalentError::NoActiveSpec)?;
        (
            spec.id,
            spec.rank_of(tab_id, spell_id),
            spec.choices.get(&spell_id).copied(),
        )
    };
    if current == 0 {
        return Err(TalentError::NotLearned(spell_id));
    }
    let new_rank = current - 1;

    // Dependents guard: sweep every learned talent for an edge on the target
    // that the reduced rank would no longer satisfy.
    {
        let spec = state.active_spec().ok_or(TalentError::NoActiveSpec)?;
        for (&other_tab_id, talents) in &spec.talents {
            let Some(other_tab) = graph.tab(other_tab_id) else {
                continue;
            };
            for (&other_spell, record) in talents {
                if record.current_rank == 0
                    || (other_tab_id == tab_id && other_spell == spell_id)
                {
                    continue;
                }
                let Some(other) = other_tab.talent(other_spell) else {
                    continue;
                };
                for edge in &other.prereqs {
                    if edge.required_rank == 0 {
                        continue;
                    }
                    if edge.tab == tab_id
                        && edge.talent == spell_id
                        && edge.required_rank > new_rank
                    {
                        return Err(TalentError::DependentRanks {
                            target: spell_id,
                            dependent: other_spell,
                        });
                    }
                }
            }
        }
    }

    let mut remove_spells = Vec::new();
    let learn_spell;
    match talent.node_kind {
        NodeKind::Choice => {
            if let Some(chosen) = chosen {
                remove_spells.push(chosen);
            }
            learn_spell = None;
        }
        NodeKind::Rank => {
            if let Some(spell) = talent.rank_spell(current) {
                remove_spells.push(spell);
            }
            learn_spell = talent.rank_spell(new_rank);
        }
    }

    let cost = talent.rank_cost;
    let point_type = tab.point_type;
    let node_kind = talent.node_kind;

    let spec = state.active_spec_mut().ok_or(TalentError::NoActiveSpec)?;
    spec.talent_mut(tab_id, spell_id, node_kind).current_rank = new_rank;
    if let Some(spent) = spec.points_spent.get_mut(&tab_id) {
        *spent = spent.saturating_sub(cost);
    }
    if node_kind == NodeKind::Choice && new_rank == 0 {
        spec.choices.remove(&spell_id);
    }
    spec.prune_tab(tab_id);
    state.refund(spec_id, point_type, cost);

    Ok(LearnOutcome {
        tab_id,
        spell_id,
        new_rank,
        learn_spell,
        remove_spells,
    })
}

/// Respecs one tab: every learned rank is dropped and every spent point is
/// returned to the spec's pool.
pub fn reset_tab(
    state: &mut CharacterState,
    tab_id: TabId,
    env: &TalentEnv<'_>,
) -> Result<ResetOutcome, TalentError> {
    let graph = env.graph()?;
    let tab = graph.tab(tab_id).ok_or(TalentError::UnknownTab(tab_id))?;
    let point_type = tab.point_type;

    let (spec_id, refunded, remove_spells) = {
        let spec = state.active_spec().ok_or(TalentError::NoActiveSpec)?;
        let refunded = spec.points_in_tab(tab_id);
        let mut remove_spells = Vec::new();
        if let Some(talents) = spec.talents.get(&tab_id) {
            for (spell, record) in talents {
                if record.current_rank == 0 {
                    continue;
                }
                let Some(talent) = tab.talent(*spell) else {
                    continue;
                };
                match talent.node_kind {
                    NodeKind::Choice => {
                        if let Some(&chosen) = spec.choices.get(spell) {
                            remove_spells.push(chosen);
                        }
                    }
                    NodeKind::Rank => {
                        if let Some(spell) = talent.rank_spell(record.current_rank) {
                            remove_spells.push(spell);
                        }
                    }
                }
            }
        }
        (spec.id, refunded, remove_spells)
    };

    let spec = state.active_spec_mut().ok_or(TalentError::NoActiveSpec)?;
    spec.talents.remove(&tab_id);
    spec.points_spent.remove(&tab_id);
    for talent in tab.talents() {
        if talent.node_kind == NodeKind::Choice {
            spec.choices.remove(&talent.spell_id);
        }
    }
    state.refund(spec_id, point_type, refunded);

    Ok(ResetOutcome {
        tab_id,
        refunded,
        remove_spells,
    })
}

/// Builds the login re-apply plan for the active spec: the spells its
/// learned ranks map to, and the unlearn lists to clear out first.
///
/// A character without an active spec yields an empty plan; absence is a
/// no-op, not a fault.
pub fn known_spells(
    state: &CharacterState,
    env: &TalentEnv<'_>,
) -> Result<KnownSpellPlan, TalentError> {
    let graph = env.graph()?;
    let mut plan = KnownSpellPlan::default();

    let Some(spec) = state.active_spec() else {
        return Ok(plan);
    };

    for (tab_id, talents) in &spec.talents {
        let Some(tab) = graph.tab(*tab_id) else {
            continue;
        };
        for (spell, record) in talents {
            if record.current_rank == 0 {
                continue;
            }
            let Some(talent) = tab.talent(*spell) else {
                continue;
            };
            plan.remove.extend(talent.unlearn_spells.iter().copied());
            match talent.node_kind {
                NodeKind::Choice => {
                    if let Some(&chosen) = spec.choices.get(spell) {
                        plan.learn.push(chosen);
                    }
                }
                NodeKind::Rank => {
                    if let Some(spell) = talent.rank_spell(record.current_rank) {
                        plan.learn.push(spell);
                    }
                }
            }
        }
    }

    Ok(plan)
}
