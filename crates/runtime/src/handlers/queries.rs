//! Read-only handlers: layout, rank snapshots, spec overview, activation.

use talent_core::engine;
use talent_core::types::{SpecId, TabId};

use crate::error::Result;
use crate::handlers::{parse_fields, persist};
use crate::messages;
use crate::router::RequestContext;

/// `TalentTreeLayout`: empty payload renders every tree, `tabId` a single
/// tab.
pub fn get_talent_tree(ctx: &mut RequestContext<'_>, payload: &str) -> Result<()> {
    if payload.trim().is_empty() {
        return messages::send_tree_layout(ctx.link, &ctx.env);
    }

    let [tab] = parse_fields(payload)?;
    messages::send_tab_layout(ctx.link, &ctx.env, TabId(tab))
}

/// `GetTalents`: empty payload snapshots every spendable tab, `tabId` a
/// single one.
pub fn get_talents(ctx: &mut RequestContext<'_>, payload: &str) -> Result<()> {
    if payload.trim().is_empty() {
        return messages::send_all_ranks(ctx.link, &ctx.env, ctx.state);
    }

    let [tab] = parse_fields(payload)?;
    messages::send_tab_ranks(ctx.link, &ctx.env, ctx.state, TabId(tab))
}

/// `GetCharacterSpecs`: renders every spec with its budget snapshots.
pub fn get_character_specs(ctx: &mut RequestContext<'_>, _payload: &str) -> Result<()> {
    messages::send_spec_overview(ctx.link, &ctx.env, ctx.state)
}

/// `ActivateSpec`: payload `specId`. Switches the active spec and re-applies
/// its known spells.
pub fn activate_spec(ctx: &mut RequestContext<'_>, payload: &str) -> Result<()> {
    let [spec] = parse_fields(payload)?;
    let spec = SpecId(spec);

    if !ctx.state.activate_spec(spec) {
        return Err(talent_core::TalentError::UnknownSpec(spec).into());
    }

    let plan = engine::known_spells(ctx.state, &ctx.env)?;
    for &unlearn in &plan.remove {
        ctx.link.remove_spell(unlearn);
    }
    for &learn in &plan.learn {
        ctx.link.learn_spell(learn);
    }
    persist(ctx)?;

    tracing::info!(character = %ctx.state.id, %spec, "spec activated");

    messages::send_spec_overview(ctx.link, &ctx.env, ctx.state)?;
    messages::send_all_ranks(ctx.link, &ctx.env, ctx.state)
}
