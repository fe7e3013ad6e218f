//! Traits describing read-only rule data.
//!
//! Oracles expose the static talent graph and the point-budget rules. The
//! [`Env`] aggregate bundles them so the legality engine can access
//! everything it needs without hard coupling to concrete implementations.
//! There is no ambient global registry; callers construct an `Env` and pass
//! it down explicitly.

use crate::budget::PointLimit;
use crate::error::ErrorSeverity;
use crate::graph::{Talent, TalentTab};
use crate::types::{CharacterPointType, SpellId, TabId};

/// Read-only access to the loaded talent graph.
pub trait GraphOracle: Send + Sync {
    fn tab(&self, id: TabId) -> Option<&TalentTab>;

    fn talent(&self, tab: TabId, spell: SpellId) -> Option<&Talent>;

    /// Tabs of a category in their wire order.
    fn tabs_for(&self, point_type: CharacterPointType) -> Vec<&TalentTab>;
}

/// Read-only access to point-budget rules.
pub trait RulesOracle: Send + Sync {
    /// Per-tab maximum and hard cap for a category.
    fn point_limit(&self, point_type: CharacterPointType) -> PointLimit;

    /// Racial points seeded at character creation.
    fn initial_points(&self) -> u32;

    /// Level ceiling for the content version.
    fn max_level(&self) -> u8;
}

/// Errors that occur when accessing oracle data.
///
/// A missing oracle is fatal: the engine cannot evaluate anything without
/// the graph and the rules.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    /// GraphOracle is not available in the environment.
    #[error("GraphOracle not available")]
    GraphNotAvailable,

    /// RulesOracle is not available in the environment.
    #[error("RulesOracle not available")]
    RulesNotAvailable,
}

impl OracleError {
    pub fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }
}

/// Aggregates the read-only oracles required by the legality engine and the
/// wire encoders.
#[derive(Clone, Copy, Debug)]
pub struct Env<'a, G, R>
where
    G: GraphOracle + ?Sized,
    R: RulesOracle + ?Sized,
{
    graph: Option<&'a G>,
    rules: Option<&'a R>,
}

pub type TalentEnv<'a> = Env<'a, dyn GraphOracle + 'a, dyn RulesOracle + 'a>;

impl<'a, G, R> Env<'a, G, R>
where
    G: GraphOracle + ?Sized,
    R: RulesOracle + ?Sized,
{
    pub fn new(graph: Option<&'a G>, rules: Option<&'a R>) -> Self {
        Self { graph, rules }
    }

    pub fn with_all(graph: &'a G, rules: &'a R) -> Self {
        Self::new(Some(graph), Some(rules))
    }

    pub fn empty() -> Self {
        Self {
            graph: None,
            rules: None,
        }
    }

    /// Returns the GraphOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::GraphNotAvailable` if no graph oracle was provided.
    pub fn graph(&self) -> Result<&'a G, OracleError> {
        self.graph.ok_or(OracleError::GraphNotAvailable)
    }

    /// Returns the RulesOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::RulesNotAvailable` if no rules oracle was provided.
    pub fn rules(&self) -> Result<&'a R, OracleError> {
        self.rules.ok_or(OracleError::RulesNotAvailable)
    }
}

impl<'a, G, R> Env<'a, G, R>
where
    G: GraphOracle + 'a,
    R: RulesOracle + 'a,
{
    /// Converts this environment into a trait-object based `TalentEnv`.
    pub fn as_talent_env(&self) -> TalentEnv<'a> {
        let graph: Option<&'a dyn GraphOracle> = self.graph.map(|graph| graph as _);
        let rules: Option<&'a dyn RulesOracle> = self.rules.map(|rules| rules as _);
        Env::new(graph, rules)
    }
}
