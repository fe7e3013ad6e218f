//! Point budget resolution.
//!
//! A legality check reads the budget exactly once, as a snapshot value, so a
//! single evaluation never observes two different answers for the same
//! question.

use crate::env::RulesOracle;
use crate::state::CharacterState;
use crate::types::{CharacterPointType, SpecId};

/// Configured ceiling for one point category.
///
/// A value of 0 is the "unlimited" sentinel for both fields.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointLimit {
    /// Maximum points spendable in any single tab of the category.
    pub max_per_tab: u32,
    /// Lifetime grant ceiling for the category.
    pub hard_cap: u32,
}

/// Budget snapshot for one (character, category, spec) triple.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointSnapshot {
    /// Granted points not yet spent in this spec.
    pub available: u32,
    /// Lifetime granted total for the category.
    pub granted: u32,
    /// Per-tab maximum (0 = unlimited).
    pub max_per_tab: u32,
    /// Lifetime cap (0 = unlimited).
    pub hard_cap: u32,
}

impl PointSnapshot {
    /// Resolves the budget for one legality check or spec payload field.
    pub fn resolve<R>(
        state: &CharacterState,
        spec: SpecId,
        point_type: CharacterPointType,
        rules: &R,
    ) -> Self
    where
        R: RulesOracle + ?Sized,
    {
        let limit = rules.point_limit(point_type);
        Self {
            available: state.available(spec, point_type),
            granted: state.granted(point_type),
            max_per_tab: limit.max_per_tab,
            hard_cap: limit.hard_cap,
        }
    }

    /// Whether the per-tab budget is uncapped.
    #[inline]
    pub const fn unlimited_tab(&self) -> bool {
        self.max_per_tab == 0
    }
}
