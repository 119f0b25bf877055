//! Agent execution records produced by the fan-out dispatcher.

use super::descriptor::AgentDescriptor;
use super::role::AgentRole;
use crate::core::redact::redact;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Terminal status of one agent's attempt chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    Completed,
    Failed,
}

impl fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentStatus::Completed => write!(f, "completed"),
            AgentStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Result of one agent within one pipeline run.
///
/// Created exactly once per roster entry when its attempt chain resolves and
/// never mutated afterwards. Both constructors redact what the model or
/// provider returned, so facts and documents derived from an execution are
/// already clean. Failed executions carry no content, only an error string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentExecution {
    pub agent_id: String,
    pub agent_name: String,
    pub role: AgentRole,
    /// Model that produced the content, or the last model tried on failure
    pub model_used: String,
    pub status: AgentStatus,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub duration_ms: u64,
    /// Provider-side completion id, when the provider returned one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_id: Option<String>,
    /// Number of models tried before the chain resolved
    pub attempts: usize,
}

impl AgentExecution {
    pub fn completed(
        agent: &AgentDescriptor,
        model: impl Into<String>,
        content: impl Into<String>,
        duration_ms: u64,
    ) -> Self {
        Self {
            agent_id: agent.id.clone(),
            agent_name: agent.display_name.clone(),
            role: agent.role,
            model_used: model.into(),
            status: AgentStatus::Completed,
            content: redact(&content.into()),
            error: None,
            duration_ms,
            response_id: None,
            attempts: 1,
        }
    }

    pub fn failed(
        agent: &AgentDescriptor,
        model: impl Into<String>,
        error: impl Into<String>,
        duration_ms: u64,
    ) -> Self {
        Self {
            agent_id: agent.id.clone(),
            agent_name: agent.display_name.clone(),
            role: agent.role,
            model_used: model.into(),
            status: AgentStatus::Failed,
            content: String::new(),
            error: Some(redact(&error.into())),
            duration_ms,
            response_id: None,
            attempts: 1,
        }
    }

    pub fn with_response_id(mut self, id: Option<String>) -> Self {
        self.response_id = id;
        self
    }

    pub fn with_attempts(mut self, attempts: usize) -> Self {
        self.attempts = attempts.max(1);
        self
    }

    pub fn is_completed(&self) -> bool {
        self.status == AgentStatus::Completed
    }
}
