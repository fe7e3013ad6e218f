//! Runtime bundle of the static content oracles.
//!
//! The graph and the rules are loaded once, wrapped in `Arc`s, and lent out
//! as [`TalentEnv`] snapshots per request. The data is immutable at runtime;
//! dynamic state lives in [`crate::service::TalentService`].

use std::sync::Arc;

use talent_core::env::{Env, GraphOracle, RulesOracle, TalentEnv};
use talent_core::graph::TalentGraph;
use talent_core::rules::TalentRules;
use talent_content::ContentFactory;

use crate::error::RuntimeError;

/// Manages the oracle implementations and provides unified access.
#[derive(Clone)]
pub struct OracleManager {
    graph: Arc<TalentGraph>,
    rules: Arc<TalentRules>,
}

impl OracleManager {
    pub fn new(graph: Arc<TalentGraph>, rules: Arc<TalentRules>) -> Self {
        Self { graph, rules }
    }

    /// Loads the embedded default content set. Failure here is fatal; there
    /// is no per-request recovery from missing content.
    pub fn load_defaults() -> Result<Self, RuntimeError> {
        let (graph, rules) =
            ContentFactory::load_defaults().map_err(|e| RuntimeError::Content(e.to_string()))?;
        Ok(Self::new(Arc::new(graph), Arc::new(rules)))
    }

    /// Lends the oracles as a core environment for one request.
    pub fn env(&self) -> TalentEnv<'_> {
        let graph: &dyn GraphOracle = self.graph.as_ref();
        let rules: &dyn RulesOracle = self.rules.as_ref();
        Env::with_all(graph, rules)
    }

    pub fn graph(&self) -> &TalentGraph {
        &self.graph
    }

    pub fn rules(&self) -> &TalentRules {
        &self.rules
    }
}
