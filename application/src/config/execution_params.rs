//! Execution parameters: per-call budgets for the pipeline.
//!
//! [`ExecutionParams`] groups the static parameters that control how the
//! dispatcher and the single-agent stages call models. These are
//! application-layer concerns, not domain policy.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use swarm_domain::RunMode;

/// Model call budgets.
///
/// | Mode | Timeout | Max tokens |
/// |------|---------|------------|
/// | fast / standard | `standard_timeout` | `max_tokens` |
/// | deep | `deep_timeout` | `deep_max_tokens` |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionParams {
    /// Per-attempt timeout for fast and standard runs.
    pub standard_timeout: Duration,
    /// Per-attempt timeout for deep runs.
    pub deep_timeout: Duration,
    /// Completion budget for fast and standard runs.
    pub max_tokens: u32,
    /// Completion budget for deep runs.
    pub deep_max_tokens: u32,
    /// Minimum trimmed length of a response to count as usable.
    pub min_usable_chars: usize,
}

impl Default for ExecutionParams {
    fn default() -> Self {
        Self {
            standard_timeout: Duration::from_secs(45),
            deep_timeout: Duration::from_secs(120),
            max_tokens: 1400,
            deep_max_tokens: 2400,
            min_usable_chars: 40,
        }
    }
}

impl ExecutionParams {
    // ==================== Builder Methods ====================

    pub fn with_standard_timeout(mut self, timeout: Duration) -> Self {
        self.standard_timeout = timeout;
        self
    }

    pub fn with_deep_timeout(mut self, timeout: Duration) -> Self {
        self.deep_timeout = timeout;
        self
    }

    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = max;
        self
    }

    pub fn with_deep_max_tokens(mut self, max: u32) -> Self {
        self.deep_max_tokens = max;
        self
    }

    pub fn with_min_usable_chars(mut self, min: usize) -> Self {
        self.min_usable_chars = min;
        self
    }

    // ==================== Per-mode Lookups ====================

    pub fn timeout_for(&self, mode: RunMode) -> Duration {
        if mode.is_deep() {
            self.deep_timeout
        } else {
            self.standard_timeout
        }
    }

    pub fn max_tokens_for(&self, mode: RunMode) -> u32 {
        if mode.is_deep() {
            self.deep_max_tokens
        } else {
            self.max_tokens
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let params = ExecutionParams::default();
        assert_eq!(params.standard_timeout, Duration::from_secs(45));
        assert_eq!(params.deep_timeout, Duration::from_secs(120));
        assert_eq!(params.max_tokens, 1400);
        assert_eq!(params.min_usable_chars, 40);
    }

    #[test]
    fn test_per_mode_lookup() {
        let params = ExecutionParams::default();
        assert_eq!(params.timeout_for(RunMode::Fast), Duration::from_secs(45));
        assert_eq!(params.timeout_for(RunMode::Standard), Duration::from_secs(45));
        assert_eq!(params.timeout_for(RunMode::Deep), Duration::from_secs(120));
        assert_eq!(params.max_tokens_for(RunMode::Deep), 2400);
    }

    #[test]
    fn test_builder() {
        let params = ExecutionParams::default()
            .with_standard_timeout(Duration::from_millis(50))
            .with_max_tokens(200)
            .with_min_usable_chars(10);

        assert_eq!(params.standard_timeout, Duration::from_millis(50));
        assert_eq!(params.max_tokens, 200);
        assert_eq!(params.min_usable_chars, 10);
    }
}
