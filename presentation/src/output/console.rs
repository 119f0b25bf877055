//! Console output formatter for pipeline results

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use swarm_domain::PipelineResult;

/// Formats pipeline results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete run: panel, consensus, verification and report
    pub fn format_full(result: &PipelineResult) -> String {
        let mut output = String::new();

        // Header
        output.push_str(&Self::header("Panel Consensus Results"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n",
            "Query:".cyan().bold(),
            result.query
        ));
        output.push_str(&format!(
            "{} {} ({} of {} agents answered, {}ms)\n\n",
            "Mode:".cyan().bold(),
            result.mode,
            result.completed_count(),
            result.executions.len(),
            result.duration_ms
        ));

        // Panel responses
        output.push_str(&Self::section_header("Panel Responses"));
        for exec in &result.executions {
            let title = format!("── {} ({}) ──", exec.agent_name, exec.model_used);
            if exec.is_completed() {
                output.push_str(&format!("\n{}\n{}\n", title.yellow().bold(), exec.content));
            } else {
                output.push_str(&format!(
                    "\n{}\nError: {}\n",
                    title.red().bold(),
                    exec.error.as_deref().unwrap_or("Unknown")
                ));
            }
        }

        // Consensus document
        output.push_str(&Self::section_header("Consensus"));
        output.push('\n');
        output.push_str(&result.consensus.markdown);
        output.push('\n');

        // Verification summary
        output.push_str(&Self::section_header("Verification"));
        output.push_str(&format!(
            "\n{} {}\n{} {}\n",
            "Supported:".green().bold(),
            result.verification.supported.len(),
            "Unverified:".yellow().bold(),
            result.verification.unsupported.len()
        ));
        for finding in &result.verification.unsupported {
            output.push_str(&format!("  * {}\n", finding));
        }

        // Final report
        output.push_str(&Self::section_header("Final Report"));
        if let Some(model) = &result.report.writer_model {
            output.push_str(&format!("\n{}\n", format!("Writer: {}", model).yellow().bold()));
        }
        output.push('\n');
        output.push_str(&result.report.to_markdown());
        output.push('\n');

        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(result: &PipelineResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the final report only (concise output)
    pub fn format_report(result: &PipelineResult) -> String {
        let mut output = result.report.to_markdown();
        output.push_str(&format!(
            "\n\n{} {}\n",
            "Models consulted:".dimmed(),
            result.models_used().join(", ")
        ));
        output
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_full(&self, result: &PipelineResult) -> String {
        Self::format_full(result)
    }

    fn format_json(&self, result: &PipelineResult) -> String {
        Self::format_json(result)
    }

    fn format_report(&self, result: &PipelineResult) -> String {
        Self::format_report(result)
    }
}
