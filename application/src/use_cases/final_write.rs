//! Final write stage
//!
//! One writer call that turns the guarded draft into the user-facing
//! report. The writer's body is guarded again. If the writer fails, the
//! guarded draft itself becomes the report.

use super::agent_call::{AgentPrompt, CallBudget, call_agent};
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::ProgressSink;
use crate::ports::transcript_logger::TranscriptLogger;
use swarm_domain::{
    AgentDescriptor, FinalReport, ProgressEvent, PromptTemplate, Query, Stage, guard,
    parse_writer_response,
};
use tracing::{info, warn};

/// Produce the final report from the guarded draft.
pub async fn run_final_write(
    gateway: &dyn LlmGateway,
    writer: &AgentDescriptor,
    query: &Query,
    draft: &str,
    budget: &CallBudget,
    sink: &dyn ProgressSink,
    transcript: &dyn TranscriptLogger,
) -> FinalReport {
    let system = PromptTemplate::writer_system();
    let user = PromptTemplate::writer_prompt(query.content(), draft);
    let prompt = AgentPrompt {
        system: &system,
        user: &user,
    };

    sink.emit(ProgressEvent::agent_start(
        Stage::FinalWrite,
        writer,
        &writer.primary_model,
    ));
    let execution =
        call_agent(gateway, writer, &prompt, budget, Stage::FinalWrite, transcript).await;
    sink.emit(ProgressEvent::agent_finish(Stage::FinalWrite, &execution));

    if !execution.is_completed() {
        let error = execution.error.as_deref().unwrap_or("unknown error");
        warn!(model = %execution.model_used, error, "Writer unavailable, using draft");
        sink.emit(ProgressEvent::log(
            Stage::FinalWrite,
            format!("Writer unavailable, returning the consensus draft: {error}"),
        ));
        return FinalReport::from_draft(draft);
    }

    let output = parse_writer_response(&execution.content);
    if !output.structured {
        sink.emit(ProgressEvent::log(
            Stage::FinalWrite,
            "Writer reply was not valid JSON; using raw text",
        ));
    }
    info!(model = %execution.model_used, structured = output.structured, "Report written");

    FinalReport {
        title: guard(&output.title),
        body: guard(&output.body),
        writer_model: Some(execution.model_used),
        structured: output.structured,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::progress::CollectingProgress;
    use crate::ports::transcript_logger::NoTranscriptLogger;
    use crate::use_cases::test_support::{MockGateway, Script};
    use std::time::Duration;
    use swarm_domain::AgentRole;

    fn writer() -> AgentDescriptor {
        AgentDescriptor::new("writer", "Writer", AgentRole::Writer, "writer-model")
            .with_fallbacks(["writer-backup"])
    }

    fn budget() -> CallBudget {
        CallBudget {
            timeout: Duration::from_millis(50),
            max_tokens: 100,
            min_usable_chars: 1,
        }
    }

    async fn run(gateway: &MockGateway) -> FinalReport {
        let query = Query::parse("q").unwrap();
        let sink = CollectingProgress::new();
        run_final_write(gateway, &writer(), &query, "## Draft", &budget(), &sink, &NoTranscriptLogger)
            .await
    }

    #[tokio::test]
    async fn test_structured_report_is_guarded() {
        let gateway = MockGateway::new().script(
            "writer-model",
            Script::Reply(
                r#"{"title":"Findings","report":"Body <script>x()</script>with key sk-abcdefghijklmnop"}"#
                    .to_string(),
            ),
        );
        let report = run(&gateway).await;
        assert!(report.structured);
        assert_eq!(report.title, "Findings");
        assert_eq!(report.body, "Body with key [REDACTED]");
        assert_eq!(report.writer_model.as_deref(), Some("writer-model"));
    }

    #[tokio::test]
    async fn test_raw_reply_used_as_body() {
        let gateway =
            MockGateway::new().script("writer-model", Script::Reply("Plain report".to_string()));
        let report = run(&gateway).await;
        assert!(!report.structured);
        assert_eq!(report.body, "Plain report");
    }

    #[tokio::test]
    async fn test_writer_failure_returns_draft() {
        let gateway = MockGateway::new()
            .script("writer-model", Script::Hang)
            .script("writer-backup", Script::Hang);
        let report = run(&gateway).await;
        assert_eq!(report.writer_model, None);
        assert_eq!(report.body, "## Draft");
        assert_eq!(gateway.calls(), vec!["writer-model", "writer-backup"]);
    }
}
