//! Static per-mode agent rosters.

use super::descriptor::AgentDescriptor;
use super::mode::RunMode;
use super::role::AgentRole;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The fixed panel for one run mode, plus the single-agent collaborators.
///
/// `agents` are fanned out concurrently; `critic` and `writer` are invoked
/// once each by the critique and final-write stages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    pub mode: RunMode,
    pub agents: Vec<AgentDescriptor>,
    pub critic: AgentDescriptor,
    pub writer: AgentDescriptor,
}

impl Roster {
    /// Build the fixed roster for a mode.
    pub fn for_mode(mode: RunMode) -> Self {
        let agents = match mode {
            RunMode::Fast => vec![
                AgentDescriptor::new("analyst", "Analyst", AgentRole::Analyst, "openai/gpt-4o-mini")
                    .with_fallbacks(["meta-llama/llama-3.1-8b-instruct"]),
                AgentDescriptor::new(
                    "researcher",
                    "Researcher",
                    AgentRole::Researcher,
                    "anthropic/claude-3-haiku",
                )
                .with_fallbacks(["openai/gpt-4o-mini"]),
                AgentDescriptor::new(
                    "generalist",
                    "Generalist",
                    AgentRole::Generalist,
                    "meta-llama/llama-3.1-8b-instruct",
                )
                .with_fallbacks(["mistralai/mistral-7b-instruct"]),
            ],
            RunMode::Standard => vec![
                AgentDescriptor::new("analyst", "Analyst", AgentRole::Analyst, "openai/gpt-4o")
                    .with_fallbacks(["openai/gpt-4o-mini", "meta-llama/llama-3.1-70b-instruct"]),
                AgentDescriptor::new(
                    "researcher",
                    "Researcher",
                    AgentRole::Researcher,
                    "anthropic/claude-3.5-sonnet",
                )
                .with_fallbacks(["anthropic/claude-3-haiku", "openai/gpt-4o-mini"]),
                AgentDescriptor::new(
                    "skeptic",
                    "Skeptic",
                    AgentRole::Skeptic,
                    "google/gemini-flash-1.5",
                )
                .with_fallbacks(["mistralai/mistral-large"]),
                AgentDescriptor::new(
                    "strategist",
                    "Strategist",
                    AgentRole::Strategist,
                    "mistralai/mistral-large",
                )
                .with_fallbacks(["meta-llama/llama-3.1-70b-instruct"]),
                AgentDescriptor::new(
                    "technologist",
                    "Technologist",
                    AgentRole::Technologist,
                    "deepseek/deepseek-chat",
                )
                .with_fallbacks(["qwen/qwen-2.5-72b-instruct"]),
            ],
            RunMode::Deep => vec![
                AgentDescriptor::new("analyst", "Analyst", AgentRole::Analyst, "openai/o1-mini")
                    .with_fallbacks(["openai/gpt-4o"]),
                AgentDescriptor::new(
                    "researcher",
                    "Researcher",
                    AgentRole::Researcher,
                    "anthropic/claude-3-opus",
                )
                .with_fallbacks(["anthropic/claude-3.5-sonnet"]),
                AgentDescriptor::new("skeptic", "Skeptic", AgentRole::Skeptic, "deepseek/deepseek-r1")
                    .with_fallbacks(["deepseek/deepseek-chat"]),
                AgentDescriptor::new(
                    "technologist",
                    "Technologist",
                    AgentRole::Technologist,
                    "google/gemini-pro-1.5",
                )
                .with_fallbacks(["google/gemini-flash-1.5"]),
            ],
        };

        Self {
            mode,
            agents,
            critic: AgentDescriptor::new(
                "critic",
                "Critic",
                AgentRole::Critic,
                "anthropic/claude-3.5-sonnet",
            )
            .with_fallbacks(["openai/gpt-4o"]),
            writer: AgentDescriptor::new("writer", "Writer", AgentRole::Writer, "openai/gpt-4o")
                .with_fallbacks(["anthropic/claude-3.5-sonnet"]),
        }
    }

    /// Build a roster from explicit descriptors (tests, embedding callers).
    pub fn custom(
        mode: RunMode,
        agents: Vec<AgentDescriptor>,
        critic: AgentDescriptor,
        writer: AgentDescriptor,
    ) -> Self {
        Self {
            mode,
            agents,
            critic,
            writer,
        }
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn get(&self, agent_id: &str) -> Option<&AgentDescriptor> {
        self.agents.iter().find(|a| a.id == agent_id)
    }

    /// Ensure the panel is non-empty and agent ids are unique.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.agents.is_empty() {
            return Err(DomainError::EmptyRoster(self.mode.to_string()));
        }
        let mut seen = HashSet::new();
        for agent in &self.agents {
            if !seen.insert(agent.id.as_str()) {
                return Err(DomainError::DuplicateAgent(agent.id.clone()));
            }
        }
        Ok(())
    }

    /// Every model any agent (panel, critic, writer) may call, deduplicated.
    pub fn all_models(&self) -> Vec<String> {
        let mut models: Vec<String> = Vec::new();
        for agent in self.agents.iter().chain([&self.critic, &self.writer]) {
            for model in agent.attempt_chain() {
                if !models.iter().any(|m| m == model) {
                    models.push(model.to_string());
                }
            }
        }
        models
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_sizes() {
        assert_eq!(Roster::for_mode(RunMode::Fast).len(), 3);
        assert_eq!(Roster::for_mode(RunMode::Standard).len(), 5);
        assert_eq!(Roster::for_mode(RunMode::Deep).len(), 4);
    }

    #[test]
    fn test_builtin_rosters_are_valid() {
        for mode in RunMode::all() {
            let roster = Roster::for_mode(mode);
            assert!(roster.validate().is_ok(), "{mode} roster invalid");
            assert_eq!(roster.mode, mode);
        }
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let a = AgentDescriptor::new("dup", "A", AgentRole::Analyst, "m1");
        let roster = Roster::custom(RunMode::Fast, vec![a.clone(), a.clone()], a.clone(), a);
        assert_eq!(
            roster.validate(),
            Err(DomainError::DuplicateAgent("dup".to_string()))
        );
    }

    #[test]
    fn test_validate_rejects_empty() {
        let a = AgentDescriptor::new("x", "X", AgentRole::Critic, "m1");
        let roster = Roster::custom(RunMode::Deep, vec![], a.clone(), a);
        assert_eq!(
            roster.validate(),
            Err(DomainError::EmptyRoster("deep".to_string()))
        );
    }

    #[test]
    fn test_all_models_deduplicated() {
        let roster = Roster::for_mode(RunMode::Standard);
        let models = roster.all_models();
        let unique: HashSet<_> = models.iter().collect();
        assert_eq!(unique.len(), models.len());
        assert!(models.contains(&"openai/gpt-4o".to_string()));
    }

    #[test]
    fn test_get_by_id() {
        let roster = Roster::for_mode(RunMode::Standard);
        assert_eq!(roster.get("skeptic").unwrap().role, AgentRole::Skeptic);
        assert!(roster.get("missing").is_none());
    }
}
