//! Fan-out dispatcher
//!
//! Sends the query to every panel agent concurrently and waits for all of
//! them (join-all, not first-success). Each agent owns its attempt chain;
//! one agent failing never cancels a sibling. Results come back in roster
//! order.

use super::agent_call::{AgentPrompt, CallBudget, call_agent};
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::ProgressSink;
use crate::ports::transcript_logger::TranscriptLogger;
use futures::future::join_all;
use std::sync::atomic::{AtomicUsize, Ordering};
use swarm_domain::{AgentExecution, ProgressEvent, PromptTemplate, Query, Roster, Stage};
use tracing::info;

/// Dispatch `query` to the whole panel.
///
/// Emits, per agent, one `agent_start` and exactly one `agent_finish`,
/// followed by a `step_progress` with the share of finished agents.
pub async fn dispatch(
    gateway: &dyn LlmGateway,
    query: &Query,
    roster: &Roster,
    budget: &CallBudget,
    sink: &dyn ProgressSink,
    transcript: &dyn TranscriptLogger,
) -> Vec<AgentExecution> {
    let total = roster.len();
    let finished = AtomicUsize::new(0);
    let user = PromptTemplate::panel_query(query.content(), roster.mode);

    info!(agents = total, mode = %roster.mode, "Dispatching query to panel");

    let tasks = roster.agents.iter().map(|agent| {
        let finished = &finished;
        let user = user.as_str();
        async move {
            let system = PromptTemplate::panel_system(agent.role);
            let prompt = AgentPrompt {
                system: &system,
                user,
            };

            sink.emit(ProgressEvent::agent_start(
                Stage::Swarm,
                agent,
                &agent.primary_model,
            ));
            let execution =
                call_agent(gateway, agent, &prompt, budget, Stage::Swarm, transcript).await;
            sink.emit(ProgressEvent::agent_finish(Stage::Swarm, &execution));

            let done = finished.fetch_add(1, Ordering::SeqCst) + 1;
            sink.emit(ProgressEvent::progress_of(Stage::Swarm, done, total));
            execution
        }
    });

    let executions = join_all(tasks).await;

    info!(
        completed = executions.iter().filter(|e| e.is_completed()).count(),
        failed = executions.iter().filter(|e| !e.is_completed()).count(),
        "Panel dispatch finished"
    );

    executions
}
