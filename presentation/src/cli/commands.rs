//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use swarm_domain::RunMode;

/// Output format for pipeline results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Panel responses, consensus, verification and the final report
    Full,
    /// Only the final report
    Report,
    /// The whole run as JSON
    Json,
}

impl From<swarm_domain::OutputFormat> for OutputFormat {
    fn from(format: swarm_domain::OutputFormat) -> Self {
        match format {
            swarm_domain::OutputFormat::Full => OutputFormat::Full,
            swarm_domain::OutputFormat::Report => OutputFormat::Report,
            swarm_domain::OutputFormat::Json => OutputFormat::Json,
        }
    }
}

/// Panel size selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Fast,
    Standard,
    Deep,
}

impl From<ModeArg> for RunMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Fast => RunMode::Fast,
            ModeArg::Standard => RunMode::Standard,
            ModeArg::Deep => RunMode::Deep,
        }
    }
}

/// CLI arguments for panel-consensus
#[derive(Parser, Debug)]
#[command(name = "panel-consensus")]
#[command(author, version, about = "Ask a panel of LLM agents and get one verified consensus report")]
#[command(long_about = r#"
panel-consensus sends your question to a panel of role-specialized LLM agents
and merges their answers into a single report.

The run has ten stages: swarm, facts, logic, critique, synthesis, verify,
refine, guard, final_write and complete. Agents that fail or time out fall
back to other models; the run only fails if no agent answers usefully.

Configuration files are loaded from (in priority order):
1. PANEL_* environment variables
2. --config <path>        Explicit config file
3. ./panel-consensus.toml Project-level config
4. ~/.config/panel-consensus/config.toml   Global config

Example:
  panel-consensus "Is nuclear power safer than coal?"
  panel-consensus --mode deep --output full "Compare Raft and Paxos"
  panel-consensus --output json --events run.jsonl "What limits battery density?"
"#)]
pub struct Cli {
    /// The question to ask the panel
    pub query: Option<String>,

    /// Panel size and timeout budget (defaults to the configured mode)
    #[arg(short, long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Output format (defaults to the configured format, then "report")
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Write every progress event to this JSONL file
    #[arg(long, value_name = "PATH")]
    pub events: Option<PathBuf>,

    /// Write tracing logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}
