//! Output and logging configuration from TOML (`[output]`, `[logging]`)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use swarm_domain::OutputFormat;

// Re-export OutputFormat from domain for convenience
pub use swarm_domain::OutputFormat as FileOutputFormat;

/// Raw output configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Output format (uses domain type)
    pub format: Option<OutputFormat>,
    /// Enable colored terminal output
    pub color: bool,
    /// Show the progress display on stderr
    pub show_progress: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
            show_progress: true,
        }
    }
}

/// Raw logging configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL file receiving every progress event
    pub events_file: Option<PathBuf>,
    /// JSONL file receiving one record per model attempt
    pub transcript_file: Option<PathBuf>,
}
