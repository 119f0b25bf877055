//! Append-only accumulator threaded through the stages.
//!
//! Each stage consumes the context and returns a new one with exactly one
//! more field set. Fields can't be overwritten, and reading a field a
//! previous stage didn't produce is an error rather than a default.

use super::result::PipelineResult;
use crate::agent::{AgentExecution, RunMode};
use crate::core::query::Query;
use crate::core::redact::redact;
use crate::critique::Critique;
use crate::fact::Fact;
use crate::logic::Conflict;
use crate::report::FinalReport;
use crate::synthesis::ConsensusDocument;
use crate::verify::VerificationReport;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Misuse of the pipeline context.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContextError {
    #[error("Context field '{0}' was already set")]
    AlreadySet(&'static str),

    #[error("Context field '{0}' has not been produced yet")]
    Missing(&'static str),
}

/// Generates a consuming setter and a borrowing getter per field.
macro_rules! context_field {
    ($field:ident, $setter:ident, $ty:ty, $view:ty, $borrow:ident) => {
        pub fn $setter(mut self, value: $ty) -> Result<Self, ContextError> {
            if self.$field.is_some() {
                return Err(ContextError::AlreadySet(stringify!($field)));
            }
            self.$field = Some(value);
            Ok(self)
        }

        pub fn $field(&self) -> Result<&$view, ContextError> {
            self.$field
                .$borrow()
                .ok_or(ContextError::Missing(stringify!($field)))
        }
    };
}

/// State of one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineContext {
    query: Query,
    mode: RunMode,
    started_at: DateTime<Utc>,
    swarm: Option<Vec<AgentExecution>>,
    facts: Option<Vec<Fact>>,
    logic: Option<Vec<Conflict>>,
    critique: Option<Critique>,
    synthesis: Option<ConsensusDocument>,
    verified: Option<VerificationReport>,
    refined: Option<String>,
    guarded: Option<String>,
    report: Option<FinalReport>,
}

impl PipelineContext {
    pub fn new(query: Query, mode: RunMode) -> Self {
        Self {
            query,
            mode,
            started_at: Utc::now(),
            swarm: None,
            facts: None,
            logic: None,
            critique: None,
            synthesis: None,
            verified: None,
            refined: None,
            guarded: None,
            report: None,
        }
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn mode(&self) -> RunMode {
        self.mode
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    context_field!(swarm, with_swarm, Vec<AgentExecution>, [AgentExecution], as_deref);
    context_field!(facts, with_facts, Vec<Fact>, [Fact], as_deref);
    context_field!(logic, with_logic, Vec<Conflict>, [Conflict], as_deref);
    context_field!(critique, with_critique, Critique, Critique, as_ref);
    context_field!(synthesis, with_synthesis, ConsensusDocument, ConsensusDocument, as_ref);
    context_field!(verified, with_verified, VerificationReport, VerificationReport, as_ref);
    context_field!(refined, with_refined, String, str, as_deref);
    context_field!(guarded, with_guarded, String, str, as_deref);
    context_field!(report, with_report, FinalReport, FinalReport, as_ref);

    /// Assemble the final result once every stage has run.
    pub fn into_result(
        self,
        run_id: String,
        duration_ms: u64,
    ) -> Result<PipelineResult, ContextError> {
        let missing = |name| ContextError::Missing(name);
        Ok(PipelineResult {
            run_id,
            query: redact(&self.query.into_content()),
            mode: self.mode,
            executions: self.swarm.ok_or(missing("swarm"))?,
            facts: self.facts.ok_or(missing("facts"))?,
            conflicts: self.logic.ok_or(missing("logic"))?,
            critique: self.critique.ok_or(missing("critique"))?,
            consensus: self.synthesis.ok_or(missing("synthesis"))?,
            verification: self.verified.ok_or(missing("verified"))?,
            draft: self.guarded.ok_or(missing("guarded"))?,
            report: self.report.ok_or(missing("report"))?,
            started_at: self.started_at,
            duration_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> PipelineContext {
        PipelineContext::new(Query::parse("What changed?").unwrap(), RunMode::Fast)
    }

    #[test]
    fn test_set_then_read() {
        let ctx = ctx().with_refined("draft".to_string()).unwrap();
        assert_eq!(ctx.refined().unwrap(), "draft");
        assert_eq!(ctx.mode(), RunMode::Fast);
    }

    #[test]
    fn test_double_set_is_rejected() {
        let ctx = ctx().with_logic(Vec::new()).unwrap();
        assert_eq!(
            ctx.with_logic(Vec::new()).unwrap_err(),
            ContextError::AlreadySet("logic")
        );
    }

    #[test]
    fn test_missing_field() {
        assert_eq!(ctx().facts().unwrap_err(), ContextError::Missing("facts"));
        assert_eq!(ctx().report().unwrap_err(), ContextError::Missing("report"));
    }

    #[test]
    fn test_into_result_requires_all_fields() {
        let ctx = ctx().with_swarm(Vec::new()).unwrap();
        assert_eq!(
            ctx.into_result("run".to_string(), 1).unwrap_err(),
            ContextError::Missing("facts")
        );
    }
}
