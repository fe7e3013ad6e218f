//! Talent transition errors.
//!
//! Every rejection carries a distinct reason code. The boolean
//! [`can_learn`](crate::engine::can_learn) facade collapses them for callers
//! that only need the legality preview.

use crate::env::OracleError;
use crate::error::ErrorSeverity;
use crate::types::{SpecId, SpellId, TabId};

/// Errors that can reject a talent transition.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TalentError {
    /// A required oracle is missing from the environment.
    #[error(transparent)]
    Oracle(#[from] OracleError),

    /// Tab id does not exist in the loaded graph.
    #[error("unknown talent tab {0}")]
    UnknownTab(TabId),

    /// The character has no active specialization configured.
    #[error("no active specialization")]
    NoActiveSpec,

    /// Spec id does not exist on this character.
    #[error("unknown specialization {0}")]
    UnknownSpec(SpecId),

    /// Talent id does not exist in the tab.
    #[error("unknown talent {spell} in tab {tab}")]
    UnknownTalent { tab: TabId, spell: SpellId },

    /// The spec has no points of the tab's category at all.
    #[error("no points available")]
    NoPointsAvailable,

    /// Character level below the talent's gate.
    #[error("requires character level {required}")]
    LevelTooLow { required: u8 },

    /// Not enough points already invested in the tab.
    #[error("requires {required} points spent in this tab")]
    TabPointsRequired { required: u32 },

    /// The rank costs more than the points left.
    #[error("rank costs {cost} points, only {available} available")]
    InsufficientPoints { cost: u32, available: u32 },

    /// Learning would push the tab past its configured maximum.
    #[error("tab budget of {max} points would be exceeded")]
    TabBudgetExceeded { max: u32 },

    /// The prerequisite combination policy is not satisfied.
    #[error("prerequisites unmet for talent {0}")]
    PrerequisitesUnmet(SpellId),

    /// Every rank of the talent is already learned.
    #[error("talent {0} is already at max rank")]
    RankCapReached(SpellId),

    /// Unlearn/choice operations on a talent with no ranks.
    #[error("talent {0} is not learned")]
    NotLearned(SpellId),

    /// Another learned talent still requires ranks in this one.
    #[error("talent {dependent} still requires ranks in {target}")]
    DependentRanks { target: SpellId, dependent: SpellId },

    /// Choice nodes are learned by selecting an alternative.
    #[error("talent {0} is a choice node, select an alternative")]
    ChoiceRequired(SpellId),

    /// Alternative selection on a linear-rank talent.
    #[error("talent {0} is not a choice node")]
    NotAChoiceNode(SpellId),

    /// The selected alternative does not belong to the node.
    #[error("spell {choice} is not an alternative of choice node {node}")]
    InvalidChoice { node: SpellId, choice: SpellId },
}

impl TalentError {
    pub fn severity(&self) -> ErrorSeverity {
        use TalentError::*;
        match self {
            Oracle(error) => error.severity(),

            UnknownTab(_) | UnknownSpec(_) | UnknownTalent { .. } | NotAChoiceNode(_)
            | InvalidChoice { .. } => ErrorSeverity::Validation,

            NoActiveSpec | NoPointsAvailable | LevelTooLow { .. } | TabPointsRequired { .. }
            | InsufficientPoints { .. } | TabBudgetExceeded { .. } | PrerequisitesUnmet(_)
            | RankCapReached(_) | NotLearned(_) | DependentRanks { .. } | ChoiceRequired(_) => {
                ErrorSeverity::Recoverable
            }
        }
    }
}
