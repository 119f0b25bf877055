//! Single-agent attempt chain.
//!
//! Walks `[primary, ..fallbacks]` for one agent. Every attempt runs under a
//! timeout; transient failures (see [`GatewayError::is_transient`]) and
//! unusable content advance to the next model, anything else ends the chain.
//! Used by the panel dispatcher and by the critique and final-write stages.

use crate::config::ExecutionParams;
use crate::ports::llm_gateway::{ChatRequest, ChatResponse, GatewayError, LlmGateway};
use crate::ports::transcript_logger::{TranscriptEvent, TranscriptLogger};
use serde_json::json;
use std::time::{Duration, Instant};
use swarm_domain::{AgentDescriptor, AgentExecution, RunMode, Stage};
use tracing::{debug, warn};

/// Case-insensitive markers of placeholder or degraded provider output.
pub const DEGRADED_SENTINELS: &[&str] = &[
    "[simulated]",
    "simulated response",
    "mock response",
    "lorem ipsum",
    "as an ai language model, i cannot",
];

/// Whether `content` is real output worth keeping.
pub fn is_usable(content: &str, min_chars: usize) -> bool {
    let trimmed = content.trim();
    if trimmed.chars().count() < min_chars.max(1) {
        return false;
    }
    let lower = trimmed.to_lowercase();
    !DEGRADED_SENTINELS.iter().any(|s| lower.contains(s))
}

/// Per-call limits for one stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CallBudget {
    pub timeout: Duration,
    pub max_tokens: u32,
    pub min_usable_chars: usize,
}

impl CallBudget {
    /// Budget for panel agents.
    pub fn panel(params: &ExecutionParams, mode: RunMode) -> Self {
        Self {
            timeout: params.timeout_for(mode),
            max_tokens: params.max_tokens_for(mode),
            min_usable_chars: params.min_usable_chars,
        }
    }

    /// Budget for critic and writer. Their structured replies can be short,
    /// so only empty output is rejected on length.
    pub fn collaborator(params: &ExecutionParams, mode: RunMode) -> Self {
        Self {
            min_usable_chars: 1,
            ..Self::panel(params, mode)
        }
    }
}

/// Prompts for one agent call.
pub struct AgentPrompt<'a> {
    pub system: &'a str,
    pub user: &'a str,
}

fn elapsed_ms(since: Instant) -> u64 {
    since.elapsed().as_millis().try_into().unwrap_or(u64::MAX)
}

async fn attempt(
    gateway: &dyn LlmGateway,
    request: &ChatRequest,
    budget: &CallBudget,
) -> Result<ChatResponse, GatewayError> {
    match tokio::time::timeout(budget.timeout, gateway.complete(request)).await {
        Ok(Ok(response)) if is_usable(&response.content, budget.min_usable_chars) => Ok(response),
        Ok(Ok(response)) => Err(GatewayError::InvalidResponse(format!(
            "unusable content ({} chars)",
            response.content.trim().chars().count()
        ))),
        Ok(Err(e)) => Err(e),
        Err(_) => Err(GatewayError::Timeout),
    }
}

/// Run one agent's attempt chain to completion.
///
/// Never fails: an exhausted or aborted chain yields a failed execution
/// carrying the last (redacted) error.
pub async fn call_agent(
    gateway: &dyn LlmGateway,
    agent: &AgentDescriptor,
    prompt: &AgentPrompt<'_>,
    budget: &CallBudget,
    stage: Stage,
    transcript: &dyn TranscriptLogger,
) -> AgentExecution {
    let started = Instant::now();
    let chain = agent.attempt_chain();
    let mut last_model = agent.primary_model.clone();
    let mut last_error = GatewayError::RequestFailed("no models configured".to_string());
    let mut attempts = 0;

    for model in chain {
        attempts += 1;
        last_model = model.to_string();
        let request = ChatRequest::new(model, prompt.system, prompt.user, budget.max_tokens);
        let attempt_started = Instant::now();

        let outcome = attempt(gateway, &request, budget).await;

        transcript.log(TranscriptEvent::new(
            "model_attempt",
            json!({
                "stage": stage.as_str(),
                "agent": agent.id,
                "model": model,
                "attempt": attempts,
                "duration_ms": elapsed_ms(attempt_started),
                "ok": outcome.is_ok(),
                "error": outcome.as_ref().err().map(|e| e.redacted().to_string()),
            }),
        ));

        match outcome {
            Ok(response) => {
                debug!(
                    agent = %agent.id,
                    model = %model,
                    attempts,
                    chars = response.content.len(),
                    "Agent completed"
                );
                return AgentExecution::completed(
                    agent,
                    model,
                    response.content.trim(),
                    elapsed_ms(started),
                )
                .with_response_id(response.id)
                .with_attempts(attempts);
            }
            Err(e) => {
                let e = e.redacted();
                let transient = e.is_transient();
                warn!(
                    agent = %agent.id,
                    model = %model,
                    attempt = attempts,
                    transient,
                    error = %e,
                    "Model attempt failed"
                );
                last_error = e;
                if !transient {
                    break;
                }
            }
        }
    }

    AgentExecution::failed(agent, last_model, last_error.to_string(), elapsed_ms(started))
        .with_attempts(attempts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::transcript_logger::NoTranscriptLogger;
    use crate::use_cases::test_support::{MockGateway, Script};
    use swarm_domain::{AgentRole, AgentStatus};

    const LONG: &str = "This answer is comfortably longer than the forty character minimum.";

    fn budget() -> CallBudget {
        CallBudget {
            timeout: Duration::from_millis(50),
            max_tokens: 100,
            min_usable_chars: 40,
        }
    }

    fn agent() -> AgentDescriptor {
        AgentDescriptor::new("analyst", "Analyst", AgentRole::Analyst, "primary")
            .with_fallbacks(["backup"])
    }

    async fn run(gateway: &MockGateway) -> AgentExecution {
        let prompt = AgentPrompt {
            system: "sys",
            user: "usr",
        };
        call_agent(gateway, &agent(), &prompt, &budget(), Stage::Swarm, &NoTranscriptLogger).await
    }

    #[test]
    fn test_is_usable() {
        assert!(is_usable(LONG, 40));
        assert!(!is_usable("   short   ", 40));
        assert!(!is_usable("", 0));
        assert!(!is_usable(
            "[Simulated] This would be a long enough answer otherwise.",
            10
        ));
        assert!(!is_usable("As an AI language model, I cannot answer that question.", 10));
    }

    #[tokio::test]
    async fn test_primary_success() {
        let gateway = MockGateway::new().script("primary", Script::Reply(LONG.to_string()));
        let exec = run(&gateway).await;
        assert_eq!(exec.status, AgentStatus::Completed);
        assert_eq!(exec.model_used, "primary");
        assert_eq!(exec.attempts, 1);
        assert_eq!(gateway.calls(), vec!["primary"]);
    }

    #[tokio::test]
    async fn test_transient_error_falls_back() {
        let gateway = MockGateway::new()
            .script("primary", Script::Fail(GatewayError::Http {
                status: 503,
                message: "unavailable".to_string(),
            }))
            .script("backup", Script::Reply(LONG.to_string()));
        let exec = run(&gateway).await;
        assert!(exec.is_completed());
        assert_eq!(exec.model_used, "backup");
        assert_eq!(exec.attempts, 2);
    }

    #[tokio::test]
    async fn test_timeout_falls_back() {
        let gateway = MockGateway::new()
            .script("primary", Script::Hang)
            .script("backup", Script::Reply(LONG.to_string()));
        let exec = run(&gateway).await;
        assert!(exec.is_completed());
        assert_eq!(exec.model_used, "backup");
    }

    #[tokio::test]
    async fn test_unusable_content_falls_back() {
        let gateway = MockGateway::new()
            .script("primary", Script::Reply("too short".to_string()))
            .script("backup", Script::Reply(LONG.to_string()));
        let exec = run(&gateway).await;
        assert_eq!(exec.model_used, "backup");
    }

    #[tokio::test]
    async fn test_non_transient_error_stops_chain() {
        let gateway = MockGateway::new()
            .script("primary", Script::Fail(GatewayError::Http {
                status: 401,
                message: "invalid key sk-abcdefghijklmnopqrst".to_string(),
            }))
            .script("backup", Script::Reply(LONG.to_string()));
        let exec = run(&gateway).await;
        assert_eq!(exec.status, AgentStatus::Failed);
        assert_eq!(exec.model_used, "primary");
        assert_eq!(exec.error.as_deref(), Some("HTTP 401: invalid key [REDACTED]"));
        assert_eq!(gateway.calls(), vec!["primary"]);
    }

    #[tokio::test]
    async fn test_exhausted_chain_fails_with_last_error() {
        let gateway = MockGateway::new()
            .script("primary", Script::Hang)
            .script("backup", Script::Fail(GatewayError::Http {
                status: 429,
                message: "rate limited".to_string(),
            }));
        let exec = run(&gateway).await;
        assert!(!exec.is_completed());
        assert_eq!(exec.model_used, "backup");
        assert_eq!(exec.attempts, 2);
        assert!(exec.content.is_empty());
        assert_eq!(exec.error.as_deref(), Some("HTTP 429: rate limited"));
    }
}
