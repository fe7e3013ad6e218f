//! Mutable per-character specialization state.
//!
//! One [`CharacterState`] exists per player, owned by the runtime service
//! and addressed by [`CharacterId`] only. All mutation flows through the
//! engine's accepted transitions; nothing here is reachable through shared
//! aliasing, so no locking is required on the per-player execution context.

use std::collections::BTreeMap;

use crate::types::{CharacterId, CharacterPointType, NodeKind, SpecId, SpellId, TabId};

/// A character's progress on one talent node.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterTalent {
    pub tab_id: TabId,
    pub spell_id: SpellId,
    /// 0 = not learned.
    pub current_rank: u8,
    pub node_kind: NodeKind,
}

impl CharacterTalent {
    pub fn new(tab_id: TabId, spell_id: SpellId, node_kind: NodeKind) -> Self {
        Self {
            tab_id,
            spell_id,
            current_rank: 0,
            node_kind,
        }
    }
}

/// One saved specialization: learned ranks, spent points, and choice-node
/// selections.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterSpec {
    pub id: SpecId,
    pub name: String,
    pub description: String,
    pub active: bool,
    pub icon: u32,
    pub visibility: u8,
    /// Tab the spec itself belongs to (its class page).
    pub owner_tab: TabId,
    /// Points spent per tab. Entries exist only for tabs with at least one
    /// learned talent.
    pub points_spent: BTreeMap<TabId, u32>,
    /// Learned talents, tab → spell → record.
    pub talents: BTreeMap<TabId, BTreeMap<SpellId, CharacterTalent>>,
    /// Choice node → chosen alternative spell.
    pub choices: BTreeMap<SpellId, SpellId>,
}

impl CharacterSpec {
    pub fn new(id: SpecId, owner_tab: TabId) -> Self {
        Self {
            id,
            name: String::new(),
            description: String::new(),
            active: false,
            icon: 0,
            visibility: 0,
            owner_tab,
            points_spent: BTreeMap::new(),
            talents: BTreeMap::new(),
            choices: BTreeMap::new(),
        }
    }

    /// Points already invested in `tab`.
    pub fn points_in_tab(&self, tab: TabId) -> u32 {
        self.points_spent.get(&tab).copied().unwrap_or(0)
    }

    pub fn talent(&self, tab: TabId, spell: SpellId) -> Option<&CharacterTalent> {
        self.talents.get(&tab).and_then(|talents| talents.get(&spell))
    }

    /// Current rank in a talent; 0 when not learned.
    pub fn rank_of(&self, tab: TabId, spell: SpellId) -> u8 {
        self.talent(tab, spell)
            .map(|talent| talent.current_rank)
            .unwrap_or(0)
    }

    pub(crate) fn talent_mut(
        &mut self,
        tab: TabId,
        spell: SpellId,
        node_kind: NodeKind,
    ) -> &mut CharacterTalent {
        self.talents
            .entry(tab)
            .or_default()
            .entry(spell)
            .or_insert_with(|| CharacterTalent::new(tab, spell, node_kind))
    }

    /// Drops the record for an unlearned talent and the tab's spend entry
    /// when it reaches zero, keeping the "entries exist only where points
    /// were spent" invariant.
    pub(crate) fn prune_tab(&mut self, tab: TabId) {
        if let Some(talents) = self.talents.get_mut(&tab) {
            talents.retain(|_, talent| talent.current_rank > 0);
            if talents.is_empty() {
                self.talents.remove(&tab);
            }
        }
        if self.points_in_tab(tab) == 0 {
            self.points_spent.remove(&tab);
        }
    }
}

/// All specialization state owned by one player character.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterState {
    pub id: CharacterId,
    specs: BTreeMap<SpecId, CharacterSpec>,
    active_spec: Option<SpecId>,
    next_spec_id: u32,
    /// Lifetime granted totals per category.
    granted: BTreeMap<CharacterPointType, u32>,
    /// Unspent points per spec and category.
    available: BTreeMap<SpecId, BTreeMap<CharacterPointType, u32>>,
}

impl CharacterState {
    pub fn new(id: CharacterId) -> Self {
        Self {
            id,
            specs: BTreeMap::new(),
            active_spec: None,
            next_spec_id: 1,
            granted: BTreeMap::new(),
            available: BTreeMap::new(),
        }
    }

    /// Creates a new spec slot. The first slot becomes the active spec.
    pub fn add_spec_slot(&mut self, owner_tab: TabId) -> SpecId {
        let id = SpecId(self.next_spec_id);
        self.next_spec_id += 1;

        let mut spec = CharacterSpec::new(id, owner_tab);
        if self.active_spec.is_none() {
            spec.active = true;
            self.active_spec = Some(id);
        }

        // New slots start with every point granted so far still unspent.
        let pool = self.available.entry(id).or_default();
        for (&point_type, &total) in &self.granted {
            pool.insert(point_type, total);
        }

        self.specs.insert(id, spec);
        id
    }

    /// The active spec, if one is configured. Absence is a valid state the
    /// caller treats as a no-op, never a fault.
    pub fn active_spec(&self) -> Option<&CharacterSpec> {
        self.active_spec.and_then(|id| self.specs.get(&id))
    }

    pub(crate) fn active_spec_mut(&mut self) -> Option<&mut CharacterSpec> {
        let id = self.active_spec?;
        self.specs.get_mut(&id)
    }

    pub fn spec(&self, id: SpecId) -> Option<&CharacterSpec> {
        self.specs.get(&id)
    }

    pub fn all_specs(&self) -> impl Iterator<Item = &CharacterSpec> {
        self.specs.values()
    }

    /// Switches the active spec. Returns false for an unknown id.
    pub fn activate_spec(&mut self, id: SpecId) -> bool {
        if !self.specs.contains_key(&id) {
            return false;
        }
        for (spec_id, spec) in &mut self.specs {
            spec.active = *spec_id == id;
        }
        self.active_spec = Some(id);
        true
    }

    /// Learned talents of `tab` on the active spec.
    pub fn talents_in_tab(&self, tab: TabId) -> Option<&BTreeMap<SpellId, CharacterTalent>> {
        self.active_spec().and_then(|spec| spec.talents.get(&tab))
    }

    /// Unspent points of one spec and category.
    pub fn available(&self, spec: SpecId, point_type: CharacterPointType) -> u32 {
        self.available
            .get(&spec)
            .and_then(|pool| pool.get(&point_type))
            .copied()
            .unwrap_or(0)
    }

    /// Lifetime granted total for a category.
    pub fn granted(&self, point_type: CharacterPointType) -> u32 {
        self.granted.get(&point_type).copied().unwrap_or(0)
    }

    /// Grants points to every spec's pool, respecting the category's hard
    /// cap when one is configured (0 = uncapped).
    pub fn grant_points(&mut self, point_type: CharacterPointType, amount: u32, hard_cap: u32) {
        if amount == 0 {
            return;
        }

        let total = self.granted.entry(point_type).or_insert(0);
        let granted = if hard_cap != 0 {
            amount.min(hard_cap.saturating_sub(*total))
        } else {
            amount
        };
        if granted == 0 {
            return;
        }
        *total += granted;

        for pool in self.available.values_mut() {
            *pool.entry(point_type).or_insert(0) += granted;
        }
    }

    pub(crate) fn spend(&mut self, spec: SpecId, point_type: CharacterPointType, amount: u32) {
        if let Some(pool) = self.available.get_mut(&spec) {
            let entry = pool.entry(point_type).or_insert(0);
            *entry = entry.saturating_sub(amount);
        }
    }

    pub(crate) fn refund(&mut self, spec: SpecId, point_type: CharacterPointType, amount: u32) {
        let pool = self.available.entry(spec).or_default();
        *pool.entry(point_type).or_insert(0) += amount;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_spec_slot_becomes_active() {
        let mut state = CharacterState::new(CharacterId(1));
        let first = state.add_spec_slot(TabId(10));
        let second = state.add_spec_slot(TabId(10));

        assert_eq!(state.active_spec().map(|spec| spec.id), Some(first));
        assert!(state.activate_spec(second));
        assert_eq!(state.active_spec().map(|spec| spec.id), Some(second));
        assert!(!state.activate_spec(SpecId(99)));
    }

    #[test]
    fn grants_reach_every_spec_pool() {
        let mut state = CharacterState::new(CharacterId(1));
        let first = state.add_spec_slot(TabId(10));
        state.grant_points(CharacterPointType::Talent, 3, 0);
        let second = state.add_spec_slot(TabId(10));

        assert_eq!(state.available(first, CharacterPointType::Talent), 3);
        // Later slots inherit the lifetime total.
        assert_eq!(state.available(second, CharacterPointType::Talent), 3);
        assert_eq!(state.granted(CharacterPointType::Talent), 3);
    }

    #[test]
    fn hard_cap_clamps_grants() {
        let mut state = CharacterState::new(CharacterId(1));
        state.add_spec_slot(TabId(10));
        state.grant_points(CharacterPointType::Racial, 6, 8);
        state.grant_points(CharacterPointType::Racial, 6, 8);

        assert_eq!(state.granted(CharacterPointType::Racial), 8);
    }
}
