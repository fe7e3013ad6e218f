//! Deterministic talent rules and data types shared across the runtime.
//!
//! `talent-core` defines the canonical rules (graph, legality, point
//! bookkeeping, wire encoding) and exposes pure APIs that can be reused by
//! both the runtime and offline tools. All character-state mutation flows
//! through [`engine`], and supporting crates depend on the types
//! re-exported here.
pub mod budget;
pub mod engine;
pub mod env;
pub mod error;
pub mod graph;
pub mod rules;
pub mod state;
pub mod types;
pub mod wire;

pub use budget::{PointLimit, PointSnapshot};
pub use engine::{
    KnownSpellPlan, LearnOutcome, ResetOutcome, TalentError, can_learn, check_learn, choose,
    known_spells, learn, reset_tab, unlearn,
};
pub use env::{Env, GraphOracle, OracleError, RulesOracle, TalentEnv};
pub use error::ErrorSeverity;
pub use graph::{
    ChoiceOption, GraphError, PrereqEdge, TabHeader, Talent, TalentGraph, TalentTab,
};
pub use rules::TalentRules;
pub use state::{CharacterSpec, CharacterState, CharacterTalent};
pub use types::{
    CharacterId, CharacterPointType, NodeKind, PrereqPolicy, SpecId, SpellId, TabId,
};
