//! Output format value object

use serde::{Deserialize, Serialize};

/// How a finished pipeline run is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Every stage: agent executions, facts, conflicts, critique, report
    Full,
    /// Only the final report (default)
    #[default]
    Report,
    /// JSON dump of the whole result
    Json,
}
