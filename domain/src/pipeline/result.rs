//! Outcome of a completed pipeline run.

use crate::agent::{AgentExecution, RunMode};
use crate::critique::Critique;
use crate::fact::Fact;
use crate::logic::Conflict;
use crate::report::FinalReport;
use crate::synthesis::ConsensusDocument;
use crate::verify::VerificationReport;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything a run produced, from raw agent output to the final report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineResult {
    pub run_id: String,
    pub query: String,
    pub mode: RunMode,
    pub executions: Vec<AgentExecution>,
    pub facts: Vec<Fact>,
    pub conflicts: Vec<Conflict>,
    pub critique: Critique,
    pub consensus: ConsensusDocument,
    pub verification: VerificationReport,
    /// Refined and guarded consensus draft handed to the writer
    pub draft: String,
    pub report: FinalReport,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
}

impl PipelineResult {
    pub fn completed_count(&self) -> usize {
        self.executions.iter().filter(|e| e.is_completed()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.executions.len() - self.completed_count()
    }

    /// Distinct models that produced usable panel output.
    pub fn models_used(&self) -> Vec<&str> {
        let mut models: Vec<&str> = Vec::new();
        for exec in self.executions.iter().filter(|e| e.is_completed()) {
            if !models.contains(&exec.model_used.as_str()) {
                models.push(&exec.model_used);
            }
        }
        models
    }
}
