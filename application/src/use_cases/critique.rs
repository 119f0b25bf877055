//! Critique stage
//!
//! One adversarial call over the leading facts. The stage can't fail the
//! run: a malformed reply degrades to raw text points, and a failed call
//! yields an empty critique.

use super::agent_call::{AgentPrompt, CallBudget, call_agent};
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::ProgressSink;
use crate::ports::transcript_logger::TranscriptLogger;
use swarm_domain::{
    AgentDescriptor, Critique, Fact, ProgressEvent, PromptTemplate, Query, Stage,
    parse_critique_response,
};
use tracing::{info, warn};

/// Ask the critic to challenge the top facts.
pub async fn run_critique(
    gateway: &dyn LlmGateway,
    critic: &AgentDescriptor,
    query: &Query,
    facts: &[Fact],
    budget: &CallBudget,
    sink: &dyn ProgressSink,
    transcript: &dyn TranscriptLogger,
) -> Critique {
    let system = PromptTemplate::critique_system();
    let user = PromptTemplate::critique_prompt(query.content(), facts);
    let prompt = AgentPrompt {
        system: &system,
        user: &user,
    };

    sink.emit(ProgressEvent::agent_start(
        Stage::Critique,
        critic,
        &critic.primary_model,
    ));
    let execution = call_agent(gateway, critic, &prompt, budget, Stage::Critique, transcript).await;
    sink.emit(ProgressEvent::agent_finish(Stage::Critique, &execution));

    if !execution.is_completed() {
        let error = execution.error.as_deref().unwrap_or("unknown error");
        warn!(model = %execution.model_used, error, "Critique unavailable");
        sink.emit(ProgressEvent::log(
            Stage::Critique,
            format!("Critique unavailable, continuing without it: {error}"),
        ));
        return Critique::empty(&critic.id);
    }

    let (points, structured) = parse_critique_response(&execution.content);
    if !structured {
        sink.emit(ProgressEvent::log(
            Stage::Critique,
            "Critic reply was not valid JSON; using raw text",
        ));
    }
    info!(points = points.len(), structured, "Critique complete");

    Critique {
        agent: critic.id.clone(),
        model: execution.model_used,
        points,
        structured,
    }
}
