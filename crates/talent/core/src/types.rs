use std::fmt;

/// Unique identifier for a talent tab (one page of a tree).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TabId(pub u32);

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of the spell behind a talent node.
///
/// Talents are keyed by the spell id of their base node; the per-rank and
/// choice-alternative spells carry their own ids.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SpellId(pub u32);

impl fmt::Display for SpellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of one saved specialization slot on a character.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpecId(pub u32);

impl fmt::Display for SpecId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a player character.
///
/// Character state is always addressed by id, never by aliased references
/// across components.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterId(pub u64);

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Point category a tab's budget is drawn from.
///
/// The discriminants are wire-visible and must stay stable: the remote UI
/// receives them as raw integers in the tree and spec payloads.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[repr(u8)]
pub enum CharacterPointType {
    /// Race-granted tree, seeded at character creation.
    Racial = 0,
    /// Class tree points, granted on even levels past 10.
    Class = 1,
    /// Specialization tree points, granted on odd levels past 10.
    Talent = 2,
    /// Skill pages, rendered separately from the spendable trees.
    SkillPage = 3,
    /// Prestige points.
    Prestige = 4,
}

impl CharacterPointType {
    /// Level-grantable categories, in the order spec payloads enumerate them.
    pub const SPENDABLE: [Self; 3] = [Self::Racial, Self::Class, Self::Talent];

    /// Integer representation used on the wire.
    #[inline]
    pub const fn wire_id(self) -> u8 {
        self as u8
    }
}

/// How a talent's prerequisite edges combine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum PrereqPolicy {
    /// Every requirement must be met.
    All = 0,
    /// At least one requirement must be met.
    #[default]
    Any = 1,
}

impl PrereqPolicy {
    /// Integer representation used on the wire.
    #[inline]
    pub const fn wire_id(self) -> u8 {
        self as u8
    }
}

/// Shape of a talent node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum NodeKind {
    /// Linear ranks: each learned rank replaces the previous rank's spell.
    #[default]
    Rank = 0,
    /// One rank slot, player selects among mutually exclusive alternatives.
    Choice = 1,
}

impl NodeKind {
    /// Integer representation used on the wire.
    #[inline]
    pub const fn wire_id(self) -> u8 {
        self as u8
    }
}
