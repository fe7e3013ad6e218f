//! Outbound payload rendering.
//!
//! Thin glue between the core wire encoders and the player link. Lookup
//! misses never hard-fail here: an unknown tab answers with an explicit
//! notice on the error topic, and a character without specs simply sends
//! nothing.

use talent_core::budget::PointSnapshot;
use talent_core::env::TalentEnv;
use talent_core::state::CharacterState;
use talent_core::types::{CharacterPointType, TabId};
use talent_core::wire;

use crate::error::Result;
use crate::router::Topic;
use crate::session::PlayerLink;

const UNKNOWN_TAB: &str = "Unknown Tab";

/// Sends the full tree layout: every tab of the spendable categories plus
/// the skill pages, one message per tab.
pub fn send_tree_layout(link: &dyn PlayerLink, env: &TalentEnv<'_>) -> Result<()> {
    let graph = env.graph().map_err(talent_core::TalentError::from)?;

    for point_type in CharacterPointType::SPENDABLE
        .into_iter()
        .chain([CharacterPointType::SkillPage])
    {
        for tab in graph.tabs_for(point_type) {
            link.send(Topic::TalentTreeLayout, &wire::encode_tab_layout(tab));
        }
    }

    Ok(())
}

/// Sends the layout of a single tab, or an unknown-tab notice.
pub fn send_tab_layout(link: &dyn PlayerLink, env: &TalentEnv<'_>, tab_id: TabId) -> Result<()> {
    let graph = env.graph().map_err(talent_core::TalentError::from)?;

    match graph.tab(tab_id) {
        Some(tab) => link.send(Topic::TalentTreeLayout, &wire::encode_tab_layout(tab)),
        None => link.send(Topic::GetTalentError, UNKNOWN_TAB),
    }

    Ok(())
}

/// Sends the rank snapshot of one tab, or an unknown-tab notice.
pub fn send_tab_ranks(
    link: &dyn PlayerLink,
    env: &TalentEnv<'_>,
    state: &CharacterState,
    tab_id: TabId,
) -> Result<()> {
    let graph = env.graph().map_err(talent_core::TalentError::from)?;

    match graph.tab(tab_id) {
        Some(tab) => link.send(Topic::GetTalents, &wire::encode_ranks(tab, state.active_spec())),
        None => link.send(Topic::GetTalentError, UNKNOWN_TAB),
    }

    Ok(())
}

/// Sends rank snapshots for every tab of the spendable categories.
pub fn send_all_ranks(
    link: &dyn PlayerLink,
    env: &TalentEnv<'_>,
    state: &CharacterState,
) -> Result<()> {
    let graph = env.graph().map_err(talent_core::TalentError::from)?;

    for point_type in CharacterPointType::SPENDABLE {
        for tab in graph.tabs_for(point_type) {
            link.send(Topic::GetTalents, &wire::encode_ranks(tab, state.active_spec()));
        }
    }

    Ok(())
}

/// Sends every spec of the character, `;`-joined, with the per-category
/// budget snapshots.
pub fn send_spec_overview(
    link: &dyn PlayerLink,
    env: &TalentEnv<'_>,
    state: &CharacterState,
) -> Result<()> {
    let rules = env.rules().map_err(talent_core::TalentError::from)?;

    let mut parts = Vec::new();
    for spec in state.all_specs() {
        let budgets: Vec<(CharacterPointType, PointSnapshot)> = CharacterPointType::SPENDABLE
            .into_iter()
            .map(|point_type| {
                (
                    point_type,
                    PointSnapshot::resolve(state, spec.id, point_type, rules),
                )
            })
            .collect();
        parts.push(wire::encode_spec(spec, &budgets));
    }

    if !parts.is_empty() {
        link.send(Topic::GetCharacterSpecs, &parts.join(";"));
    }

    Ok(())
}

/// Sends the active spec alone, same payload shape as the overview.
pub fn send_active_spec(
    link: &dyn PlayerLink,
    env: &TalentEnv<'_>,
    state: &CharacterState,
) -> Result<()> {
    let rules = env.rules().map_err(talent_core::TalentError::from)?;

    let Some(spec) = state.active_spec() else {
        return Ok(());
    };

    let budgets: Vec<(CharacterPointType, PointSnapshot)> = CharacterPointType::SPENDABLE
        .into_iter()
        .map(|point_type| {
            (
                point_type,
                PointSnapshot::resolve(state, spec.id, point_type, rules),
            )
        })
        .collect();

    link.send(Topic::GetCharacterSpecs, &wire::encode_spec(spec, &budgets));
    Ok(())
}
