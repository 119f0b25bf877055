//! Output formatter trait

use swarm_domain::PipelineResult;

/// Trait for formatting pipeline results
pub trait OutputFormatter {
    /// Format the complete run
    fn format_full(&self, result: &PipelineResult) -> String;

    /// Format as JSON
    fn format_json(&self, result: &PipelineResult) -> String;

    /// Format the final report only (concise output)
    fn format_report(&self, result: &PipelineResult) -> String;
}
