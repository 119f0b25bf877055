//! Fact entity

use super::tokens::token_set;
use crate::agent::{AgentExecution, AgentRole};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// An atomic claim extracted from one agent's response.
///
/// `token_set` exists purely for similarity scoring and is not serialized.
/// `confidence` is always within `[0, 1]`, and `agreeing_agents` never
/// contains `source_agent`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fact {
    pub text: String,
    #[serde(skip)]
    pub token_set: BTreeSet<String>,
    pub confidence: f64,
    pub agreeing_agent_count: usize,
    pub agreeing_agents: BTreeSet<String>,
    pub source_agent: String,
    pub source_model: String,
    pub source_role: AgentRole,
}

impl Fact {
    /// Create an unscored fact attributed to the execution that produced it.
    pub fn from_execution(text: impl Into<String>, execution: &AgentExecution) -> Self {
        let text = text.into();
        Self {
            token_set: token_set(&text),
            text,
            confidence: 0.0,
            agreeing_agent_count: 0,
            agreeing_agents: BTreeSet::new(),
            source_agent: execution.agent_id.clone(),
            source_model: execution.model_used.clone(),
            source_role: execution.role,
        }
    }

    /// Number of normalized tokens, used as the length signal.
    pub fn token_count(&self) -> usize {
        self.token_set.len()
    }
}
