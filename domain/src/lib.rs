//! Domain layer for panel-consensus
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Panel
//!
//! A query is fanned out to a fixed panel of agents (the [`Roster`] for a
//! [`RunMode`]). Each agent has a role whose priors weight its claims.
//!
//! ## Facts and Agreement
//!
//! Agent responses are segmented into atomic [`Fact`]s. Facts from different
//! agents with high token overlap corroborate each other, raising their
//! confidence.
//!
//! ## Synthesis
//!
//! Near-duplicate facts are clustered, weighted by role specialty and
//! rendered into a [`ConsensusDocument`], which is then verified, refined,
//! guarded and handed to a writer for the [`FinalReport`].

pub mod agent;
pub mod config;
pub mod core;
pub mod critique;
pub mod fact;
pub mod guard;
pub mod logic;
pub mod pipeline;
pub mod prompt;
pub mod report;
pub mod synthesis;
pub mod verify;

// Re-export commonly used types
pub use agent::{AgentDescriptor, AgentExecution, AgentRole, AgentStatus, Roster, RunMode};
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use core::{
    error::DomainError,
    query::Query,
    redact::{REDACTION_MARKER, contains_secret, redact},
};
pub use critique::{Critique, CritiquePoint, parse_critique_response};
pub use fact::{Fact, extract_facts};
pub use guard::guard;
pub use logic::{Conflict, ConflictKind, detect_conflicts};
pub use pipeline::{ContextError, PipelineContext, PipelineResult, ProgressEvent, Stage};
pub use prompt::PromptTemplate;
pub use report::{FinalReport, parse_writer_response};
pub use synthesis::{ConsensusDocument, ScoredFact, synthesize};
pub use verify::{VerificationReport, refine, verify};
