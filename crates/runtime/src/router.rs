//! Topic routing for UI messages.
//!
//! Dispatch is a flat command table: topic id → plain handler function over
//! a uniform [`RequestContext`]. Handlers never panic the router; a
//! rejection is answered on the error topic and logged at a severity that
//! matches the failure.

use std::collections::HashMap;

use talent_core::env::TalentEnv;
use talent_core::state::CharacterState;

use crate::error::{Result, RuntimeError};
use crate::handlers;
use crate::repository::SpecRepository;
use crate::session::PlayerLink;

/// Message topics shared with the remote UI.
///
/// Discriminants are the wire ids and must stay stable.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[repr(u16)]
pub enum Topic {
    TalentTreeLayout = 0,
    GetTalents = 1,
    GetTalentError = 2,
    LearnTalent = 3,
    UnlearnTalent = 4,
    RespecTalents = 5,
    GetCharacterSpecs = 6,
    ActivateSpec = 7,
    LearnChoice = 8,
}

impl Topic {
    /// Integer representation used on the wire.
    #[inline]
    pub const fn wire_id(self) -> u16 {
        self as u16
    }

    /// Resolves a wire id back to a topic.
    pub const fn from_wire(id: u16) -> Option<Self> {
        Some(match id {
            0 => Self::TalentTreeLayout,
            1 => Self::GetTalents,
            2 => Self::GetTalentError,
            3 => Self::LearnTalent,
            4 => Self::UnlearnTalent,
            5 => Self::RespecTalents,
            6 => Self::GetCharacterSpecs,
            7 => Self::ActivateSpec,
            8 => Self::LearnChoice,
            _ => return None,
        })
    }
}

/// Everything one dispatch may touch: the player's own state, the shared
/// read-only environment, the session link and the persistence hook.
pub struct RequestContext<'a> {
    pub state: &'a mut CharacterState,
    pub env: TalentEnv<'a>,
    pub link: &'a dyn PlayerLink,
    pub repository: &'a dyn SpecRepository,
}

/// Uniform handler signature for every topic.
pub type HandlerFn = fn(&mut RequestContext<'_>, &str) -> Result<()>;

/// Registry mapping topics to handler functions.
pub struct TopicRouter {
    handlers: HashMap<Topic, HandlerFn>,
}

impl TopicRouter {
    /// Creates an empty router.
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Creates a router with every built-in handler registered.
    pub fn with_defaults() -> Self {
        let mut router = Self::new();
        router.register(Topic::TalentTreeLayout, handlers::get_talent_tree);
        router.register(Topic::GetTalents, handlers::get_talents);
        router.register(Topic::LearnTalent, handlers::learn_talent);
        router.register(Topic::LearnChoice, handlers::learn_choice);
        router.register(Topic::UnlearnTalent, handlers::unlearn_talent);
        router.register(Topic::RespecTalents, handlers::respec_talents);
        router.register(Topic::GetCharacterSpecs, handlers::get_character_specs);
        router.register(Topic::ActivateSpec, handlers::activate_spec);
        router
    }

    /// Registers a handler, replacing any previous one for the topic.
    pub fn register(&mut self, topic: Topic, handler: HandlerFn) {
        self.handlers.insert(topic, handler);
    }

    /// Dispatches one message. Failures are answered on the error topic and
    /// never propagate to the caller.
    pub fn route(&self, ctx: &mut RequestContext<'_>, topic: Topic, payload: &str) {
        let Some(handler) = self.handlers.get(&topic) else {
            tracing::warn!(%topic, "no handler registered for topic");
            return;
        };

        if let Err(error) = handler(ctx, payload) {
            match &error {
                RuntimeError::Talent(talent) if talent.severity().is_recoverable() => {
                    tracing::debug!(%topic, %error, "request rejected");
                }
                _ => tracing::warn!(%topic, %error, "request failed"),
            }
            ctx.link.send(Topic::GetTalentError, &error.to_string());
        }
    }
}

impl Default for TopicRouter {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_ids_round_trip() {
        for topic in [
            Topic::TalentTreeLayout,
            Topic::GetTalents,
            Topic::GetTalentError,
            Topic::LearnTalent,
            Topic::UnlearnTalent,
            Topic::RespecTalents,
            Topic::GetCharacterSpecs,
            Topic::ActivateSpec,
            Topic::LearnChoice,
        ] {
            assert_eq!(Topic::from_wire(topic.wire_id()), Some(topic));
        }
        assert_eq!(Topic::from_wire(999), None);
    }
}
