//! Mutating talent handlers: learn, choice selection, unlearn, respec.

use talent_core::engine;
use talent_core::types::{SpellId, TabId};

use crate::error::Result;
use crate::handlers::{apply_outcome, parse_fields, persist};
use crate::messages;
use crate::router::RequestContext;

/// `LearnTalent`: payload `tabId^spellId`.
pub fn learn_talent(ctx: &mut RequestContext<'_>, payload: &str) -> Result<()> {
    let [tab, spell] = parse_fields(payload)?;
    let tab = TabId(tab);
    let spell = SpellId(spell);

    let outcome = engine::learn(ctx.state, ctx.link.level(), tab, spell, &ctx.env)?;
    apply_outcome(ctx.link, &outcome);
    persist(ctx)?;

    tracing::info!(
        character = %ctx.state.id,
        %tab,
        %spell,
        rank = outcome.new_rank,
        "talent learned"
    );

    messages::send_tab_ranks(ctx.link, &ctx.env, ctx.state, tab)?;
    messages::send_spec_overview(ctx.link, &ctx.env, ctx.state)
}

/// `LearnChoice`: payload `tabId^spellId^choiceSpellId`.
pub fn learn_choice(ctx: &mut RequestContext<'_>, payload: &str) -> Result<()> {
    let [tab, spell, choice] = parse_fields(payload)?;
    let tab = TabId(tab);
    let spell = SpellId(spell);
    let choice = SpellId(choice);

    let outcome = engine::choose(ctx.state, ctx.link.level(), tab, spell, choice, &ctx.env)?;
    apply_outcome(ctx.link, &outcome);
    persist(ctx)?;

    tracing::info!(
        character = %ctx.state.id,
        %tab,
        node = %spell,
        %choice,
        "choice node selected"
    );

    messages::send_tab_ranks(ctx.link, &ctx.env, ctx.state, tab)?;
    messages::send_spec_overview(ctx.link, &ctx.env, ctx.state)
}

/// `UnlearnTalent`: payload `tabId^spellId`.
pub fn unlearn_talent(ctx: &mut RequestContext<'_>, payload: &str) -> Result<()> {
    let [tab, spell] = parse_fields(payload)?;
    let tab = TabId(tab);
    let spell = SpellId(spell);

    let outcome = engine::unlearn(ctx.state, tab, spell, &ctx.env)?;
    apply_outcome(ctx.link, &outcome);
    persist(ctx)?;

    tracing::info!(
        character = %ctx.state.id,
        %tab,
        %spell,
        rank = outcome.new_rank,
        "talent unlearned"
    );

    messages::send_tab_ranks(ctx.link, &ctx.env, ctx.state, tab)?;
    messages::send_spec_overview(ctx.link, &ctx.env, ctx.state)
}

/// `RespecTalents`: payload `tabId`.
pub fn respec_talents(ctx: &mut RequestContext<'_>, payload: &str) -> Result<()> {
    let [tab] = parse_fields(payload)?;
    let tab = TabId(tab);

    let outcome = engine::reset_tab(ctx.state, tab, &ctx.env)?;
    for &spell in &outcome.remove_spells {
        ctx.link.remove_spell(spell);
    }
    persist(ctx)?;

    tracing::info!(
        character = %ctx.state.id,
        %tab,
        refunded = outcome.refunded,
        "tab respecced"
    );

    messages::send_tab_ranks(ctx.link, &ctx.env, ctx.state, tab)?;
    messages::send_spec_overview(ctx.link, &ctx.env, ctx.state)
}
