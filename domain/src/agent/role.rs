//! Agent roles and their fixed scoring priors.
//!
//! Reliability and specialty weight are business constants, looked up from
//! [`ROLE_PRIORS`] with an explicit [`DEFAULT_PRIOR`] for roles that have no
//! entry (critic, writer).

use serde::{Deserialize, Serialize};
use std::fmt;

/// The perspective an agent is prompted to take on the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentRole {
    /// Quantitative, data-first answers
    Analyst,
    /// Source-oriented, thorough factual coverage
    Researcher,
    /// Looks for weaknesses and caveats
    Skeptic,
    /// Big-picture implications and trade-offs
    Strategist,
    /// Technical mechanisms and implementation detail
    Technologist,
    /// Cheap all-rounder used in fast mode
    Generalist,
    /// Adversarial reviewer of accepted facts
    Critic,
    /// Final report writer
    Writer,
}

/// Fixed per-role priors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RolePrior {
    /// Prior probability that a claim from this role is correct, in `[0.5, 0.62]`
    pub reliability: f64,
    /// Multiplier applied during synthesis, in `[0.9, 1.15]`
    pub specialty_weight: f64,
}

/// Prior used for any role missing from [`ROLE_PRIORS`].
pub const DEFAULT_PRIOR: RolePrior = RolePrior {
    reliability: 0.55,
    specialty_weight: 1.0,
};

/// Lookup table of role priors.
pub const ROLE_PRIORS: &[(AgentRole, RolePrior)] = &[
    (
        AgentRole::Analyst,
        RolePrior {
            reliability: 0.60,
            specialty_weight: 1.10,
        },
    ),
    (
        AgentRole::Researcher,
        RolePrior {
            reliability: 0.62,
            specialty_weight: 1.15,
        },
    ),
    (
        AgentRole::Skeptic,
        RolePrior {
            reliability: 0.56,
            specialty_weight: 0.95,
        },
    ),
    (
        AgentRole::Strategist,
        RolePrior {
            reliability: 0.55,
            specialty_weight: 1.0,
        },
    ),
    (
        AgentRole::Technologist,
        RolePrior {
            reliability: 0.58,
            specialty_weight: 1.05,
        },
    ),
    (
        AgentRole::Generalist,
        RolePrior {
            reliability: 0.50,
            specialty_weight: 0.90,
        },
    ),
];

impl AgentRole {
    /// Look up this role's priors, falling back to [`DEFAULT_PRIOR`].
    pub fn prior(&self) -> RolePrior {
        ROLE_PRIORS
            .iter()
            .find(|(role, _)| role == self)
            .map(|(_, prior)| *prior)
            .unwrap_or(DEFAULT_PRIOR)
    }

    pub fn reliability(&self) -> f64 {
        self.prior().reliability
    }

    pub fn specialty_weight(&self) -> f64 {
        self.prior().specialty_weight
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AgentRole::Analyst => "analyst",
            AgentRole::Researcher => "researcher",
            AgentRole::Skeptic => "skeptic",
            AgentRole::Strategist => "strategist",
            AgentRole::Technologist => "technologist",
            AgentRole::Generalist => "generalist",
            AgentRole::Critic => "critic",
            AgentRole::Writer => "writer",
        }
    }

    /// System prompt flavour for this role.
    pub fn persona(&self) -> &'static str {
        match self {
            AgentRole::Analyst => {
                "You are a quantitative analyst. Lead with concrete figures, dates and measurable facts."
            }
            AgentRole::Researcher => {
                "You are a meticulous researcher. State well-established facts precisely and completely."
            }
            AgentRole::Skeptic => {
                "You are a careful skeptic. State what is reliably known and flag common misconceptions."
            }
            AgentRole::Strategist => {
                "You are a strategist. Explain implications, trade-offs and the most important drivers."
            }
            AgentRole::Technologist => {
                "You are a technologist. Explain the underlying mechanisms and technical details."
            }
            AgentRole::Generalist => {
                "You are a knowledgeable generalist. Give a clear, factual overview."
            }
            AgentRole::Critic => {
                "You are an adversarial reviewer. Challenge claims that may be wrong, outdated or overstated."
            }
            AgentRole::Writer => {
                "You are a precise technical writer. Turn vetted findings into a clear, faithful report."
            }
        }
    }
}

impl fmt::Display for AgentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priors_within_documented_ranges() {
        for (role, prior) in ROLE_PRIORS {
            assert!(
                (0.5..=0.62).contains(&prior.reliability),
                "{role} reliability out of range"
            );
            assert!(
                (0.9..=1.15).contains(&prior.specialty_weight),
                "{role} weight out of range"
            );
        }
    }

    #[test]
    fn test_unlisted_roles_use_default() {
        assert_eq!(AgentRole::Critic.prior(), DEFAULT_PRIOR);
        assert_eq!(AgentRole::Writer.reliability(), 0.55);
        assert_eq!(AgentRole::Writer.specialty_weight(), 1.0);
    }

    #[test]
    fn test_listed_role_lookup() {
        assert_eq!(AgentRole::Researcher.reliability(), 0.62);
        assert_eq!(AgentRole::Generalist.specialty_weight(), 0.90);
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&AgentRole::Technologist).unwrap();
        assert_eq!(json, "\"technologist\"");
    }
}
