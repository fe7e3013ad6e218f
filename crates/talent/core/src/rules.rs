//! Tunable point-budget rules.
//!
//! Loaded from TOML by the content crate; the struct itself lives here so
//! the engine can consume it through [`RulesOracle`] without a content
//! dependency.

use std::collections::BTreeMap;

use crate::budget::PointLimit;
use crate::env::RulesOracle;
use crate::types::CharacterPointType;

/// Point-budget configuration for one content version.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TalentRules {
    /// Racial points granted when a character is created.
    pub initial_points: u32,
    /// Level ceiling.
    pub max_level: u8,
    /// Per-category ceilings. Categories absent from the map are unlimited.
    pub limits: BTreeMap<CharacterPointType, PointLimit>,
}

impl TalentRules {
    pub const DEFAULT_INITIAL_POINTS: u32 = 8;
    pub const DEFAULT_MAX_LEVEL: u8 = 80;
}

impl Default for TalentRules {
    fn default() -> Self {
        Self {
            initial_points: Self::DEFAULT_INITIAL_POINTS,
            max_level: Self::DEFAULT_MAX_LEVEL,
            limits: BTreeMap::new(),
        }
    }
}

impl RulesOracle for TalentRules {
    fn point_limit(&self, point_type: CharacterPointType) -> PointLimit {
        self.limits.get(&point_type).copied().unwrap_or_default()
    }

    fn initial_points(&self) -> u32 {
        self.initial_points
    }

    fn max_level(&self) -> u8 {
        self.max_level
    }
}
