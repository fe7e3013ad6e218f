//! Talent transition engine.
//!
//! All reads and writes of [`CharacterState`](crate::state::CharacterState)
//! specialization data flow through this module: the pure legality check
//! ([`can_learn`]/[`check_learn`]) and the accepted transitions
//! ([`learn`], [`choose`], [`unlearn`], [`reset_tab`]). Every transition
//! validates completely before mutating; a rejected request leaves the
//! state untouched.
//!
//! Spell side effects are not applied here. Transitions return the spell
//! delta ([`LearnOutcome`]) for the host engine to apply, and
//! [`known_spells`] produces the full re-apply plan used at login.

mod error;
mod legality;
mod mutate;

pub use error::TalentError;
pub use legality::{can_learn, check_learn};
pub use mutate::{KnownSpellPlan, LearnOutcome, ResetOutcome, choose, known_spells, learn, reset_tab, unlearn};

#[cfg(test)]
pub(crate) mod fixture;
