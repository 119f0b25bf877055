//! Run Pipeline use case
//!
//! Orchestrates the full consensus flow for one query:
//!
//! ```text
//! swarm → facts → logic → critique → synthesis → verify → refine → guard → final_write → complete
//! ```
//!
//! Configuration problems (blank query, missing credentials) are reported
//! before any event is emitted or any model is called.

use super::agent_call::CallBudget;
use super::critique::run_critique;
use super::dispatch::dispatch;
use super::final_write::run_final_write;
use crate::config::ExecutionParams;
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::{NoProgress, ProgressSink};
use crate::ports::transcript_logger::{NoTranscriptLogger, TranscriptEvent, TranscriptLogger};
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;
use swarm_domain::{
    ContextError, DomainError, PipelineContext, PipelineResult, ProgressEvent, Query, Roster,
    RunMode, Stage, detect_conflicts, extract_facts, guard, redact, refine, synthesize, verify,
};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

/// Fatal problems detected before the run starts
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("Query is empty")]
    MissingQuery,

    #[error("Missing credentials for model '{model}': {reason}")]
    MissingCredentials { model: String, reason: String },

    #[error("Invalid roster: {0}")]
    InvalidRoster(DomainError),
}

/// Errors that abort a pipeline run
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("All {roster_size} agents failed to produce usable output")]
    SwarmFailed {
        roster_size: usize,
        /// `agent: error` per failed agent
        failures: Vec<String>,
    },

    #[error("No agent executions available for extraction")]
    NoExecutions,

    #[error("No facts could be extracted from {executions} agent response(s)")]
    NoFacts { executions: usize },

    #[error("No accepted facts reached synthesis")]
    NoAcceptedFacts,

    #[error("Pipeline state error: {0}")]
    Context(#[from] ContextError),

    #[error("Domain error: {0}")]
    Domain(DomainError),
}

impl From<DomainError> for PipelineError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::NoExecutions => PipelineError::NoExecutions,
            DomainError::NoFacts { executions } => PipelineError::NoFacts { executions },
            DomainError::NoAcceptedFacts => PipelineError::NoAcceptedFacts,
            other => PipelineError::Domain(other),
        }
    }
}

impl PipelineError {
    /// Copy of the error with every free-text field redacted.
    pub fn redacted(&self) -> Self {
        match self {
            PipelineError::Configuration(ConfigurationError::MissingCredentials {
                model,
                reason,
            }) => ConfigurationError::MissingCredentials {
                model: redact(model),
                reason: redact(reason),
            }
            .into(),
            PipelineError::SwarmFailed {
                roster_size,
                failures,
            } => PipelineError::SwarmFailed {
                roster_size: *roster_size,
                failures: failures.iter().map(|f| redact(f)).collect(),
            },
            other => other.clone(),
        }
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, PipelineError::Configuration(_))
    }
}

/// Options for one run
#[derive(Debug, Clone, Default)]
pub struct PipelineOptions {
    pub mode: RunMode,
    /// Replaces the built-in roster for `mode`
    pub roster: Option<Roster>,
}

impl PipelineOptions {
    pub fn new(mode: RunMode) -> Self {
        Self { mode, roster: None }
    }

    pub fn with_roster(mut self, roster: Roster) -> Self {
        self.roster = Some(roster);
        self
    }
}

/// Use case for running the consensus pipeline
pub struct RunPipelineUseCase<G: LlmGateway + 'static> {
    gateway: Arc<G>,
    params: ExecutionParams,
    transcript: Arc<dyn TranscriptLogger>,
}

impl<G: LlmGateway + 'static> RunPipelineUseCase<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            params: ExecutionParams::default(),
            transcript: Arc::new(NoTranscriptLogger),
        }
    }

    pub fn with_params(mut self, params: ExecutionParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_transcript(mut self, transcript: Arc<dyn TranscriptLogger>) -> Self {
        self.transcript = transcript;
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        query: &str,
        options: PipelineOptions,
    ) -> Result<PipelineResult, PipelineError> {
        self.execute_with_progress(query, options, &NoProgress).await
    }

    /// Execute the use case, reporting to `sink`
    ///
    /// Returns the completed result or a single error whose text has been
    /// redacted.
    pub async fn execute_with_progress(
        &self,
        query: &str,
        options: PipelineOptions,
        sink: &dyn ProgressSink,
    ) -> Result<PipelineResult, PipelineError> {
        let mode = options.mode;
        let outcome = self.run(query, options, sink).await;

        match outcome {
            Ok(result) => {
                self.transcript.log(TranscriptEvent::new(
                    "run_completed",
                    json!({
                        "run_id": result.run_id,
                        "mode": mode.as_str(),
                        "completed_agents": result.completed_count(),
                        "failed_agents": result.failed_count(),
                        "facts": result.facts.len(),
                        "duration_ms": result.duration_ms,
                    }),
                ));
                Ok(result)
            }
            Err(e) => {
                let e = e.redacted();
                warn!(error = %e, "Pipeline run failed");
                self.transcript.log(TranscriptEvent::new(
                    "run_failed",
                    json!({ "mode": mode.as_str(), "error": e.to_string() }),
                ));
                Err(e)
            }
        }
    }

    fn validate(&self, query: &str, roster: &Roster) -> Result<Query, ConfigurationError> {
        let query = Query::parse(query).ok_or(ConfigurationError::MissingQuery)?;
        roster.validate().map_err(ConfigurationError::InvalidRoster)?;

        for model in roster.all_models() {
            self.gateway.check_credentials(&model).map_err(|e| {
                ConfigurationError::MissingCredentials {
                    model: model.clone(),
                    reason: e.to_string(),
                }
            })?;
        }
        Ok(query)
    }

    async fn run(
        &self,
        query: &str,
        options: PipelineOptions,
        sink: &dyn ProgressSink,
    ) -> Result<PipelineResult, PipelineError> {
        let mode = options.mode;
        let roster = options.roster.unwrap_or_else(|| Roster::for_mode(mode));
        let query = self.validate(query, &roster)?;

        let run_id = Uuid::new_v4().to_string();
        let started = Instant::now();
        let gateway: &dyn LlmGateway = self.gateway.as_ref();
        let transcript = self.transcript.as_ref();
        let panel_budget = CallBudget::panel(&self.params, mode);
        let collaborator_budget = CallBudget::collaborator(&self.params, mode);

        info!(run_id = %run_id, mode = %mode, agents = roster.len(), "Starting pipeline run");
        let ctx = PipelineContext::new(query.clone(), mode);

        // Stage 1: swarm
        sink.emit(ProgressEvent::step_progress(Stage::Swarm, 0));
        let executions =
            dispatch(gateway, &query, &roster, &panel_budget, sink, transcript).await;
        if !executions.iter().any(|e| e.is_completed()) {
            return Err(PipelineError::SwarmFailed {
                roster_size: roster.len(),
                failures: executions
                    .iter()
                    .map(|e| {
                        format!(
                            "{}: {}",
                            e.agent_id,
                            e.error.as_deref().unwrap_or("unknown error")
                        )
                    })
                    .collect(),
            });
        }
        let ctx = ctx.with_swarm(executions)?;

        // Stage 2: facts
        sink.emit(ProgressEvent::step_progress(Stage::Facts, 0));
        let facts = extract_facts(ctx.swarm()?)?;
        sink.emit(ProgressEvent::log(
            Stage::Facts,
            format!("Extracted {} facts", facts.len()),
        ));
        sink.emit(ProgressEvent::step_progress(Stage::Facts, 100));
        let ctx = ctx.with_facts(facts)?;

        // Stage 3: logic
        sink.emit(ProgressEvent::step_progress(Stage::Logic, 0));
        let conflicts = detect_conflicts(ctx.facts()?);
        if !conflicts.is_empty() {
            sink.emit(ProgressEvent::log(
                Stage::Logic,
                format!("Found {} potential conflicts between agents", conflicts.len()),
            ));
        }
        sink.emit(ProgressEvent::step_progress(Stage::Logic, 100));
        let ctx = ctx.with_logic(conflicts)?;

        // Stage 4: critique
        sink.emit(ProgressEvent::step_progress(Stage::Critique, 0));
        let critique = run_critique(
            gateway,
            &roster.critic,
            &query,
            ctx.facts()?,
            &collaborator_budget,
            sink,
            transcript,
        )
        .await;
        sink.emit(ProgressEvent::step_progress(Stage::Critique, 100));
        let ctx = ctx.with_critique(critique)?;

        // Stage 5: synthesis
        sink.emit(ProgressEvent::step_progress(Stage::Synthesis, 0));
        let document = synthesize(ctx.facts()?, ctx.logic()?, &ctx.critique()?.points)?;
        sink.emit(ProgressEvent::step_progress(Stage::Synthesis, 100));
        let ctx = ctx.with_synthesis(document)?;

        // Stage 6: verify
        sink.emit(ProgressEvent::step_progress(Stage::Verify, 0));
        let report = verify(ctx.synthesis()?);
        sink.emit(ProgressEvent::log(
            Stage::Verify,
            format!(
                "{} of {} findings supported",
                report.supported.len(),
                report.total()
            ),
        ));
        sink.emit(ProgressEvent::step_progress(Stage::Verify, 100));
        let ctx = ctx.with_verified(report)?;

        // Stage 7: refine
        sink.emit(ProgressEvent::step_progress(Stage::Refine, 0));
        let refined = refine(ctx.synthesis()?, ctx.verified()?);
        sink.emit(ProgressEvent::step_progress(Stage::Refine, 100));
        let ctx = ctx.with_refined(refined)?;

        // Stage 8: guard
        sink.emit(ProgressEvent::step_progress(Stage::Guard, 0));
        let guarded = guard(ctx.refined()?);
        sink.emit(ProgressEvent::step_progress(Stage::Guard, 100));
        let ctx = ctx.with_guarded(guarded)?;

        // Stage 9: final write
        sink.emit(ProgressEvent::step_progress(Stage::FinalWrite, 0));
        let final_report = run_final_write(
            gateway,
            &roster.writer,
            &query,
            ctx.guarded()?,
            &collaborator_budget,
            sink,
            transcript,
        )
        .await;
        sink.emit(ProgressEvent::step_progress(Stage::FinalWrite, 100));
        let ctx = ctx.with_report(final_report)?;

        // Stage 10: complete
        let duration_ms = started.elapsed().as_millis().try_into().unwrap_or(u64::MAX);
        let result = ctx.into_result(run_id, duration_ms)?;
        sink.emit(ProgressEvent::step_progress(Stage::Complete, 100));

        info!(
            run_id = %result.run_id,
            completed = result.completed_count(),
            facts = result.facts.len(),
            findings = result.consensus.findings.len(),
            duration_ms,
            "Pipeline run complete"
        );
        Ok(result)
    }
}
