//! Per-player talent service.
//!
//! The service owns every character's mutable state, keyed by id. All
//! operations for one player run on that player's serialized execution
//! context, so nothing here locks; the shared graph and rules are read-only
//! behind the oracle manager.

use std::collections::HashMap;
use std::sync::Arc;

use talent_core::engine;
use talent_core::env::RulesOracle;
use talent_core::state::CharacterState;
use talent_core::types::{CharacterId, CharacterPointType};

use crate::messages;
use crate::oracle::OracleManager;
use crate::progression;
use crate::repository::SpecRepository;
use crate::router::{RequestContext, Topic, TopicRouter};
use crate::session::PlayerLink;

/// Facade over the talent module: message dispatch, lifecycle hooks and
/// character state ownership.
pub struct TalentService {
    oracles: OracleManager,
    repository: Arc<dyn SpecRepository>,
    router: TopicRouter,
    characters: HashMap<CharacterId, CharacterState>,
}

impl TalentService {
    pub fn new(oracles: OracleManager, repository: Arc<dyn SpecRepository>) -> Self {
        Self {
            oracles,
            repository,
            router: TopicRouter::with_defaults(),
            characters: HashMap::new(),
        }
    }

    /// Router access for custom topic registrations.
    pub fn router_mut(&mut self) -> &mut TopicRouter {
        &mut self.router
    }

    pub fn oracles(&self) -> &OracleManager {
        &self.oracles
    }

    /// In-memory state of one character, if loaded.
    pub fn character(&self, id: CharacterId) -> Option<&CharacterState> {
        self.characters.get(&id)
    }

    /// Routes one UI message for the player.
    pub fn handle_message(&mut self, link: &dyn PlayerLink, topic_id: u16, payload: &str) {
        let Some(topic) = Topic::from_wire(topic_id) else {
            tracing::warn!(topic_id, "dropping message with unknown topic id");
            return;
        };

        let id = link.character();
        let state = Self::state_entry(&mut self.characters, self.repository.as_ref(), id);
        let env = self.oracles.env();

        let mut ctx = RequestContext {
            state,
            env,
            link,
            repository: self.repository.as_ref(),
        };
        self.router.route(&mut ctx, topic, payload);
    }

    /// Character-creation hook: one default spec slot and the initial
    /// racial grant.
    pub fn on_character_create(&mut self, link: &dyn PlayerLink) {
        let id = link.character();
        let owner_tab = self
            .oracles
            .graph()
            .tabs_for(CharacterPointType::Class)
            .first()
            .map(|tab| tab.id)
            .unwrap_or_default();
        let initial = self.oracles.rules().initial_points;
        let racial_cap = self
            .oracles
            .rules()
            .point_limit(CharacterPointType::Racial)
            .hard_cap;

        let state = self
            .characters
            .entry(id)
            .or_insert_with(|| CharacterState::new(id));
        state.add_spec_slot(owner_tab);
        state.grant_points(CharacterPointType::Racial, initial, racial_cap);

        if let Err(error) = self.repository.save_character(state) {
            tracing::warn!(character = %id, %error, "failed to persist created character");
        }
        tracing::info!(character = %id, initial, "character talent state initialized");
    }

    /// Grants an additional specialization slot (prestige and similar
    /// flows). The first slot on a character becomes its active spec.
    pub fn grant_spec_slot(&mut self, link: &dyn PlayerLink) -> talent_core::SpecId {
        let id = link.character();
        let owner_tab = self
            .oracles
            .graph()
            .tabs_for(CharacterPointType::Class)
            .first()
            .map(|tab| tab.id)
            .unwrap_or_default();

        let state = Self::state_entry(&mut self.characters, self.repository.as_ref(), id);
        let spec = state.add_spec_slot(owner_tab);

        if let Err(error) = self.repository.save_character(state) {
            tracing::warn!(character = %id, %error, "failed to persist new spec slot");
        }
        tracing::info!(character = %id, %spec, "spec slot granted");
        spec
    }

    /// Login hook: re-applies the spells the active spec's ranks map to.
    pub fn on_login(&mut self, link: &dyn PlayerLink) {
        let id = link.character();
        let state = Self::state_entry(&mut self.characters, self.repository.as_ref(), id);
        let env = self.oracles.env();

        match engine::known_spells(state, &env) {
            Ok(plan) => {
                for &spell in &plan.remove {
                    link.remove_spell(spell);
                }
                for &spell in &plan.learn {
                    link.learn_spell(spell);
                }
                tracing::info!(
                    character = %id,
                    spells = plan.learn.len(),
                    "known talents re-applied"
                );
            }
            Err(error) => {
                tracing::warn!(character = %id, %error, "failed to build known-spell plan");
            }
        }
    }

    /// Level-change hook: grants points on the level cadence and refreshes
    /// the UI.
    pub fn on_level_changed(&mut self, link: &dyn PlayerLink, old_level: u8) {
        let new_level = link.level();
        if new_level <= old_level {
            return;
        }

        let (talent, class) = progression::level_up_grants(old_level, new_level);
        let talent_cap = self
            .oracles
            .rules()
            .point_limit(CharacterPointType::Talent)
            .hard_cap;
        let class_cap = self
            .oracles
            .rules()
            .point_limit(CharacterPointType::Class)
            .hard_cap;

        let id = link.character();
        let state = Self::state_entry(&mut self.characters, self.repository.as_ref(), id);
        state.grant_points(CharacterPointType::Talent, talent, talent_cap);
        state.grant_points(CharacterPointType::Class, class, class_cap);

        if let Err(error) = self.repository.save_character(state) {
            tracing::warn!(character = %id, %error, "failed to persist level grants");
        }

        let env = self.oracles.env();
        if talent > 0 || class > 0 {
            tracing::info!(character = %id, new_level, talent, class, "level points granted");
            if let Err(error) = messages::send_active_spec(link, &env, state) {
                tracing::warn!(character = %id, %error, "failed to send active spec");
            }
            if let Err(error) = messages::send_all_ranks(link, &env, state) {
                tracing::warn!(character = %id, %error, "failed to send rank snapshots");
            }
        }
        if let Err(error) = messages::send_spec_overview(link, &env, state) {
            tracing::warn!(character = %id, %error, "failed to send spec overview");
        }
    }

    /// Deletion hook: drops in-memory and persisted state.
    pub fn on_character_delete(&mut self, id: CharacterId) {
        self.characters.remove(&id);
        if let Err(error) = self.repository.delete_character(id) {
            tracing::warn!(character = %id, %error, "failed to delete character state");
        }
        tracing::info!(character = %id, "character talent state deleted");
    }

    fn state_entry<'a>(
        characters: &'a mut HashMap<CharacterId, CharacterState>,
        repository: &dyn SpecRepository,
        id: CharacterId,
    ) -> &'a mut CharacterState {
        characters.entry(id).or_insert_with(|| {
            match repository.load_character(id) {
                Ok(Some(state)) => state,
                Ok(None) => CharacterState::new(id),
                Err(error) => {
                    tracing::warn!(character = %id, %error, "failed to load character state");
                    CharacterState::new(id)
                }
            }
        })
    }
}
