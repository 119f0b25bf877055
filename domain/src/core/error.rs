//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Unknown run mode: {0}")]
    UnknownMode(String),

    #[error("Roster for mode '{0}' is empty")]
    EmptyRoster(String),

    #[error("Duplicate agent id in roster: {0}")]
    DuplicateAgent(String),

    #[error("No agent executions available for extraction")]
    NoExecutions,

    #[error("No facts could be extracted from {executions} agent response(s)")]
    NoFacts { executions: usize },

    #[error("No accepted facts reached synthesis")]
    NoAcceptedFacts,
}
