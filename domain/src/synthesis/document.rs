//! The consensus draft: short answer plus weighted findings, rendered as
//! markdown with a fixed section layout.

use super::cluster::{ScoredFact, rank_findings};
use crate::core::error::DomainError;
use crate::critique::CritiquePoint;
use crate::fact::Fact;
use crate::logic::Conflict;
use serde::{Deserialize, Serialize};

/// Findings considered for the short answer.
pub const SHORT_ANSWER_FACTS: usize = 8;
/// Character budget of the short answer.
pub const SHORT_ANSWER_CHARS: usize = 650;

pub const SHORT_ANSWER_HEADING: &str = "## Short Answer";
pub const FINDINGS_HEADING: &str = "## Weighted Findings";
pub const CONFLICTS_HEADING: &str = "## Conflicts";
pub const CRITIQUE_HEADING: &str = "## Critique";
/// Placeholder body for sections with nothing to show.
pub const EMPTY_SECTION: &str = "_None found._";

/// Synthesized consensus before verification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsensusDocument {
    pub short_answer: String,
    pub findings: Vec<ScoredFact>,
    pub conflicts: Vec<Conflict>,
    pub critique_points: Vec<CritiquePoint>,
    pub markdown: String,
}

fn as_sentence(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.ends_with(['.', '!', '?']) {
        trimmed.to_string()
    } else {
        format!("{trimmed}.")
    }
}

/// Greedy short answer from the leading findings.
///
/// Stops at the first sentence that would push the answer past
/// [`SHORT_ANSWER_CHARS`].
pub fn short_answer(findings: &[ScoredFact]) -> String {
    let mut answer = String::new();
    for finding in findings.iter().take(SHORT_ANSWER_FACTS) {
        let sentence = as_sentence(&finding.fact.text);
        let extra = if answer.is_empty() { 0 } else { 1 };
        if answer.chars().count() + extra + sentence.chars().count() > SHORT_ANSWER_CHARS {
            break;
        }
        if !answer.is_empty() {
            answer.push(' ');
        }
        answer.push_str(&sentence);
    }
    answer
}

/// Bullet line for one weighted finding.
pub fn finding_line(finding: &ScoredFact) -> String {
    format!(
        "- {} _(agent: {}, confidence: {:.2}, score: {:.2}, model: {})_",
        finding.fact.text.trim(),
        finding.fact.source_agent,
        finding.fact.confidence,
        finding.composite_score,
        finding.fact.source_model,
    )
}

fn conflict_line(conflict: &Conflict) -> String {
    format!(
        "- \"{}\" ({}) vs \"{}\" ({}): {} disagreement, similarity {:.2}",
        conflict.left.text,
        conflict.left.agent,
        conflict.right.text,
        conflict.right.agent,
        conflict.kind.as_str(),
        conflict.similarity,
    )
}

fn critique_line(point: &CritiquePoint) -> String {
    if point.claim.is_empty() {
        format!("- **{}**: {}", point.severity.as_str(), point.challenge)
    } else {
        format!(
            "- **{}**: {} (re: {})",
            point.severity.as_str(),
            point.challenge,
            point.claim
        )
    }
}

fn section(out: &mut String, heading: &str, lines: Vec<String>) {
    out.push_str(heading);
    out.push_str("\n\n");
    if lines.is_empty() {
        out.push_str(EMPTY_SECTION);
        out.push('\n');
    } else {
        for line in lines {
            out.push_str(&line);
            out.push('\n');
        }
    }
    out.push('\n');
}

impl ConsensusDocument {
    /// Render the fixed markdown layout.
    pub fn render(
        short_answer: &str,
        findings: &[ScoredFact],
        conflicts: &[Conflict],
        critique_points: &[CritiquePoint],
    ) -> String {
        let mut out = String::new();

        let short = if short_answer.is_empty() {
            Vec::new()
        } else {
            vec![short_answer.to_string()]
        };
        section(&mut out, SHORT_ANSWER_HEADING, short);
        section(&mut out, FINDINGS_HEADING, findings.iter().map(finding_line).collect());
        section(&mut out, CONFLICTS_HEADING, conflicts.iter().map(conflict_line).collect());
        section(
            &mut out,
            CRITIQUE_HEADING,
            critique_points.iter().map(critique_line).collect(),
        );

        out.trim_end().to_string()
    }
}

/// Build the consensus draft from accepted facts.
pub fn synthesize(
    facts: &[Fact],
    conflicts: &[Conflict],
    critique_points: &[CritiquePoint],
) -> Result<ConsensusDocument, DomainError> {
    if facts.is_empty() {
        return Err(DomainError::NoAcceptedFacts);
    }

    let findings = rank_findings(facts);
    let short_answer = short_answer(&findings);
    let markdown = ConsensusDocument::render(&short_answer, &findings, conflicts, critique_points);

    Ok(ConsensusDocument {
        short_answer,
        findings,
        conflicts: conflicts.to_vec(),
        critique_points: critique_points.to_vec(),
        markdown,
    })
}
