//! Run mode selection.
//!
//! [`RunMode`] picks the roster and the per-call timeout budget:
//! - Fast: three cheap agents, standard timeout
//! - Standard: five-agent panel, standard timeout
//! - Deep: four reasoning-heavy agents, long timeout

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Mode selector for a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    /// Small, cheap panel for quick answers
    Fast,
    /// Default five-agent panel
    #[default]
    Standard,
    /// Reasoning models with a longer per-call timeout
    Deep,
}

impl RunMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunMode::Fast => "fast",
            RunMode::Standard => "standard",
            RunMode::Deep => "deep",
        }
    }

    /// Deep-reasoning modes get the long per-call timeout.
    pub fn is_deep(&self) -> bool {
        matches!(self, RunMode::Deep)
    }

    pub fn description(&self) -> &'static str {
        match self {
            RunMode::Fast => "Fast: three lightweight agents",
            RunMode::Standard => "Standard: five-agent panel",
            RunMode::Deep => "Deep: reasoning models, long timeouts",
        }
    }

    pub fn all() -> [RunMode; 3] {
        [RunMode::Fast, RunMode::Standard, RunMode::Deep]
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RunMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fast" | "quick" => Ok(RunMode::Fast),
            "standard" | "default" => Ok(RunMode::Standard),
            "deep" | "reasoning" => Ok(RunMode::Deep),
            other => Err(DomainError::UnknownMode(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display_roundtrip() {
        for mode in RunMode::all() {
            assert_eq!(mode.to_string().parse::<RunMode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!("Quick".parse::<RunMode>().unwrap(), RunMode::Fast);
        assert_eq!(" reasoning ".parse::<RunMode>().unwrap(), RunMode::Deep);
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            "turbo".parse::<RunMode>(),
            Err(DomainError::UnknownMode("turbo".to_string()))
        );
    }

    #[test]
    fn test_default_is_standard() {
        assert_eq!(RunMode::default(), RunMode::Standard);
        assert!(!RunMode::Standard.is_deep());
        assert!(RunMode::Deep.is_deep());
    }
}
