//! Pipeline configuration from TOML (`[pipeline]` section)

use serde::{Deserialize, Serialize};
use std::time::Duration;
use swarm_application::ExecutionParams;
use swarm_domain::{ConfigIssue, ConfigIssueCode, RunMode};

/// Raw call budgets and default mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePipelineConfig {
    /// Mode used when `--mode` is not given
    pub mode: RunMode,
    /// Per-attempt timeout for fast and standard runs
    pub standard_timeout_secs: u64,
    /// Per-attempt timeout for deep runs
    pub deep_timeout_secs: u64,
    pub max_tokens: u32,
    pub deep_max_tokens: u32,
    /// Panel responses shorter than this (trimmed) are treated as unusable
    pub min_usable_chars: usize,
}

impl Default for FilePipelineConfig {
    fn default() -> Self {
        let params = ExecutionParams::default();
        Self {
            mode: RunMode::default(),
            standard_timeout_secs: params.standard_timeout.as_secs(),
            deep_timeout_secs: params.deep_timeout.as_secs(),
            max_tokens: params.max_tokens,
            deep_max_tokens: params.deep_max_tokens,
            min_usable_chars: params.min_usable_chars,
        }
    }
}

impl FilePipelineConfig {
    pub fn to_execution_params(&self) -> ExecutionParams {
        ExecutionParams::default()
            .with_standard_timeout(Duration::from_secs(self.standard_timeout_secs))
            .with_deep_timeout(Duration::from_secs(self.deep_timeout_secs))
            .with_max_tokens(self.max_tokens)
            .with_deep_max_tokens(self.deep_max_tokens)
            .with_min_usable_chars(self.min_usable_chars)
    }

    pub(super) fn validate(&self, issues: &mut Vec<ConfigIssue>) {
        for (field, secs) in [
            ("pipeline.standard_timeout_secs", self.standard_timeout_secs),
            ("pipeline.deep_timeout_secs", self.deep_timeout_secs),
        ] {
            if secs == 0 {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::ZeroTimeout {
                        field: field.to_string(),
                    },
                    format!("{field} cannot be 0"),
                ));
            }
        }

        for (field, tokens) in [
            ("pipeline.max_tokens", self.max_tokens),
            ("pipeline.deep_max_tokens", self.deep_max_tokens),
        ] {
            if tokens == 0 {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::ZeroMaxTokens {
                        field: field.to_string(),
                    },
                    format!("{field} cannot be 0"),
                ));
            }
        }
    }
}
