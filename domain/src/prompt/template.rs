//! Prompt templates for the consensus pipeline

use crate::agent::{AgentRole, RunMode};
use crate::fact::Fact;

/// Facts shown to the critic.
pub const CRITIQUE_FACTS: usize = 8;

/// Templates for generating prompts at each model-facing stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for a panel agent
    pub fn panel_system(role: AgentRole) -> String {
        format!(
            r#"{}
Answer independently; other experts are answering the same question in parallel.
Write short, self-contained declarative sentences, one claim per sentence.
Prefer specific, checkable statements over general commentary.
Do not mention that you are an AI and do not add disclaimers."#,
            role.persona()
        )
    }

    /// User prompt for a panel agent
    pub fn panel_query(query: &str, mode: RunMode) -> String {
        let depth = if mode.is_deep() {
            "Reason carefully and cover edge cases before answering."
        } else {
            "Be concise."
        };
        format!(
            r#"Question:

{}

{} Use bullet points or short paragraphs."#,
            query, depth
        )
    }

    /// System prompt for the critique stage
    pub fn critique_system() -> String {
        format!(
            r#"{}
Respond with JSON only, in exactly this shape:
{{"counterarguments": [{{"claim": "...", "challenge": "...", "severity": "low|medium|high"}}]}}
Raise at most 8 counterarguments. Return an empty list if every claim holds."#,
            AgentRole::Critic.persona()
        )
    }

    /// User prompt for the critique stage
    pub fn critique_prompt(query: &str, facts: &[Fact]) -> String {
        let mut prompt = format!(
            r#"Original question: {}

The panel agreed on the following claims, highest confidence first:
"#,
            query
        );

        for (i, fact) in facts.iter().take(CRITIQUE_FACTS).enumerate() {
            prompt.push_str(&format!(
                "{}. {} (confidence {:.2})\n",
                i + 1,
                fact.text,
                fact.confidence
            ));
        }

        prompt.push_str("\nChallenge the claims that are wrong, outdated, unsupported or overstated.");
        prompt
    }

    /// System prompt for the final writer pass
    pub fn writer_system() -> String {
        format!(
            r#"{}
Respond with JSON only, in exactly this shape:
{{"title": "...", "report": "<markdown>"}}
Keep every claim traceable to the draft. Keep findings marked as unverified clearly hedged.
Do not invent sources, numbers or facts that are not in the draft."#,
            AgentRole::Writer.persona()
        )
    }

    /// User prompt for the final writer pass
    pub fn writer_prompt(query: &str, draft: &str) -> String {
        format!(
            r#"Original question: {}

Consensus draft:

{}

Rewrite the draft into a well-structured markdown report that answers the question."#,
            query, draft
        )
    }
}
