//! Progress events pushed to the caller while a run is in flight.
//!
//! Events are a side channel: nothing in the pipeline reads them back. Every
//! string a constructor accepts is redacted before it is stored, so a sink
//! can forward events to a client as-is.

use super::stage::Stage;
use crate::agent::{AgentDescriptor, AgentExecution, AgentStatus};
use crate::core::redact::redact;
use crate::core::string::snippet;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum length of the output preview in `agent_finish`.
pub const SNIPPET_CHARS: usize = 160;

/// A single progress event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProgressEvent {
    StepProgress {
        step: Stage,
        at: DateTime<Utc>,
        percent: u8,
    },
    Log {
        step: Stage,
        at: DateTime<Utc>,
        message: String,
    },
    AgentStart {
        step: Stage,
        at: DateTime<Utc>,
        agent: String,
        agent_name: String,
        model: String,
    },
    AgentFinish {
        step: Stage,
        at: DateTime<Utc>,
        agent: String,
        agent_name: String,
        model: String,
        status: AgentStatus,
        duration_ms: u64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        snippet: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
}

impl ProgressEvent {
    pub fn step_progress(step: Stage, percent: u8) -> Self {
        ProgressEvent::StepProgress {
            step,
            at: Utc::now(),
            percent: percent.min(100),
        }
    }

    /// Percentage of `done` out of `total`, for counting progress.
    pub fn progress_of(step: Stage, done: usize, total: usize) -> Self {
        let percent = if total == 0 { 100 } else { done * 100 / total };
        Self::step_progress(step, percent.min(100) as u8)
    }

    pub fn log(step: Stage, message: impl AsRef<str>) -> Self {
        ProgressEvent::Log {
            step,
            at: Utc::now(),
            message: redact(message.as_ref()),
        }
    }

    pub fn agent_start(step: Stage, agent: &AgentDescriptor, model: &str) -> Self {
        ProgressEvent::AgentStart {
            step,
            at: Utc::now(),
            agent: agent.id.clone(),
            agent_name: agent.display_name.clone(),
            model: model.to_string(),
        }
    }

    /// Finish event for a resolved attempt chain.
    ///
    /// Completed executions carry a preview of their content; failed ones
    /// carry only the redacted error.
    pub fn agent_finish(step: Stage, execution: &AgentExecution) -> Self {
        let (snippet, error) = match execution.status {
            AgentStatus::Completed => (
                Some(redact(&snippet(execution.content.trim(), SNIPPET_CHARS))),
                None,
            ),
            AgentStatus::Failed => (
                None,
                Some(redact(execution.error.as_deref().unwrap_or("unknown error"))),
            ),
        };
        ProgressEvent::AgentFinish {
            step,
            at: Utc::now(),
            agent: execution.agent_id.clone(),
            agent_name: execution.agent_name.clone(),
            model: execution.model_used.clone(),
            status: execution.status,
            duration_ms: execution.duration_ms,
            snippet,
            error,
        }
    }

    pub fn step(&self) -> Stage {
        match self {
            ProgressEvent::StepProgress { step, .. }
            | ProgressEvent::Log { step, .. }
            | ProgressEvent::AgentStart { step, .. }
            | ProgressEvent::AgentFinish { step, .. } => *step,
        }
    }

    pub fn at(&self) -> DateTime<Utc> {
        match self {
            ProgressEvent::StepProgress { at, .. }
            | ProgressEvent::Log { at, .. }
            | ProgressEvent::AgentStart { at, .. }
            | ProgressEvent::AgentFinish { at, .. } => *at,
        }
    }

    /// Agent id for per-agent events.
    pub fn agent(&self) -> Option<&str> {
        match self {
            ProgressEvent::AgentStart { agent, .. } | ProgressEvent::AgentFinish { agent, .. } => {
                Some(agent)
            }
            _ => None,
        }
    }

    /// Wire name of the variant.
    pub fn kind(&self) -> &'static str {
        match self {
            ProgressEvent::StepProgress { .. } => "step_progress",
            ProgressEvent::Log { .. } => "log",
            ProgressEvent::AgentStart { .. } => "agent_start",
            ProgressEvent::AgentFinish { .. } => "agent_finish",
        }
    }
}
