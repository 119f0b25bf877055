//! The fixed stage sequence of a pipeline run.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One step of the pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Swarm,
    Facts,
    Logic,
    Critique,
    Synthesis,
    Verify,
    Refine,
    Guard,
    FinalWrite,
    Complete,
}

impl Stage {
    pub const ALL: [Stage; 10] = [
        Stage::Swarm,
        Stage::Facts,
        Stage::Logic,
        Stage::Critique,
        Stage::Synthesis,
        Stage::Verify,
        Stage::Refine,
        Stage::Guard,
        Stage::FinalWrite,
        Stage::Complete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Swarm => "swarm",
            Stage::Facts => "facts",
            Stage::Logic => "logic",
            Stage::Critique => "critique",
            Stage::Synthesis => "synthesis",
            Stage::Verify => "verify",
            Stage::Refine => "refine",
            Stage::Guard => "guard",
            Stage::FinalWrite => "final_write",
            Stage::Complete => "complete",
        }
    }

    /// Human-readable label for progress displays.
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Swarm => "Consulting panel",
            Stage::Facts => "Extracting facts",
            Stage::Logic => "Checking for conflicts",
            Stage::Critique => "Critiquing",
            Stage::Synthesis => "Synthesizing",
            Stage::Verify => "Verifying findings",
            Stage::Refine => "Refining draft",
            Stage::Guard => "Guarding output",
            Stage::FinalWrite => "Writing report",
            Stage::Complete => "Complete",
        }
    }

    /// 1-based position in the run.
    pub fn number(&self) -> usize {
        Self::ALL
            .iter()
            .position(|s| s == self)
            .map_or(0, |i| i + 1)
    }

    /// Whether the stage calls a remote model.
    pub fn calls_models(&self) -> bool {
        matches!(self, Stage::Swarm | Stage::Critique | Stage::FinalWrite)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
