//! Topic handlers.
//!
//! Every handler is a plain function over [`RequestContext`]: parse the
//! payload, run the engine, persist through the hook, push the refreshed
//! payloads. Mutating handlers live in [`talents`], read-only renders in
//! [`queries`].

mod queries;
mod talents;

pub use queries::{activate_spec, get_character_specs, get_talent_tree, get_talents};
pub use talents::{learn_choice, learn_talent, respec_talents, unlearn_talent};

use talent_core::engine::LearnOutcome;

use crate::error::{Result, RuntimeError};
use crate::router::RequestContext;
use crate::session::PlayerLink;

/// Splits a `^`-separated payload into exactly `N` integer fields.
pub(crate) fn parse_fields<const N: usize>(payload: &str) -> Result<[u32; N]> {
    let mut fields = [0u32; N];
    let mut parts = payload.split('^');

    for slot in &mut fields {
        let part = parts
            .next()
            .ok_or_else(|| RuntimeError::MalformedPayload(format!("expected {N} fields")))?;
        *slot = part
            .trim()
            .parse()
            .map_err(|_| RuntimeError::MalformedPayload(format!("not a number: {part:?}")))?;
    }

    if parts.next().is_some() {
        return Err(RuntimeError::MalformedPayload(format!(
            "expected {N} fields"
        )));
    }

    Ok(fields)
}

/// Applies a spell delta to the character's spell book, removals first.
pub(crate) fn apply_outcome(link: &dyn PlayerLink, outcome: &LearnOutcome) {
    for &spell in &outcome.remove_spells {
        link.remove_spell(spell);
    }
    if let Some(spell) = outcome.learn_spell {
        link.learn_spell(spell);
    }
}

/// Invokes the persistence hook for the context's character.
pub(crate) fn persist(ctx: &RequestContext<'_>) -> Result<()> {
    ctx.repository.save_character(ctx.state)?;
    Ok(())
}
