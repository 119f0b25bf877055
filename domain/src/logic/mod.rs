//! Deterministic conflict detection between agents.
//!
//! Looks for pairs of facts from different agents that talk about the same
//! thing (moderate token overlap, below the agreement threshold) yet differ
//! in polarity or in the numbers they quote. Feeds the "Conflicts" section
//! of the consensus document.

use crate::fact::agreement::{AGREEMENT_THRESHOLD, jaccard};
use crate::fact::Fact;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Lower similarity bound for two facts to be considered the same topic.
pub const TOPIC_THRESHOLD: f64 = 0.35;
/// Maximum number of conflicts reported.
pub const MAX_CONFLICTS: usize = 12;

const NEGATION_MARKERS: &[&str] = &[
    "not", "no", "never", "cannot", "can't", "won't", "isn't", "aren't", "doesn't", "don't",
    "didn't", "none", "neither", "without",
];

/// Why two facts were flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    /// Exactly one side is negated
    Negation,
    /// Both quote numbers, but different ones
    Numeric,
}

impl ConflictKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConflictKind::Negation => "negation",
            ConflictKind::Numeric => "numeric",
        }
    }
}

/// Minimal reference to a fact inside a conflict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactRef {
    pub text: String,
    pub agent: String,
    pub model: String,
}

impl From<&Fact> for FactRef {
    fn from(fact: &Fact) -> Self {
        Self {
            text: fact.text.clone(),
            agent: fact.source_agent.clone(),
            model: fact.source_model.clone(),
        }
    }
}

/// Two facts from different agents that appear to contradict each other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conflict {
    pub left: FactRef,
    pub right: FactRef,
    pub similarity: f64,
    pub kind: ConflictKind,
}

fn is_negated(text: &str) -> bool {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .any(|word| NEGATION_MARKERS.contains(&word))
}

fn numbers(text: &str) -> BTreeSet<String> {
    let mut found = BTreeSet::new();
    let mut current = String::new();
    for c in text.chars().chain(std::iter::once(' ')) {
        if c.is_ascii_digit() || (c == '.' && !current.is_empty()) {
            current.push(c);
        } else if !current.is_empty() {
            found.insert(current.trim_end_matches('.').to_string());
            current.clear();
        }
    }
    found
}

fn classify(a: &Fact, b: &Fact) -> Option<ConflictKind> {
    if is_negated(&a.text) != is_negated(&b.text) {
        return Some(ConflictKind::Negation);
    }
    let (na, nb) = (numbers(&a.text), numbers(&b.text));
    if !na.is_empty() && !nb.is_empty() && na != nb {
        return Some(ConflictKind::Numeric);
    }
    None
}

/// Find contradicting fact pairs across agents, most similar first.
pub fn detect_conflicts(facts: &[Fact]) -> Vec<Conflict> {
    let mut conflicts = Vec::new();

    for (i, a) in facts.iter().enumerate() {
        for b in &facts[i + 1..] {
            if a.source_agent == b.source_agent {
                continue;
            }
            let similarity = jaccard(&a.token_set, &b.token_set);
            if !(TOPIC_THRESHOLD..AGREEMENT_THRESHOLD).contains(&similarity) {
                continue;
            }
            if let Some(kind) = classify(a, b) {
                conflicts.push(Conflict {
                    left: a.into(),
                    right: b.into(),
                    similarity,
                    kind,
                });
            }
        }
    }

    conflicts.sort_by(|x, y| y.similarity.total_cmp(&x.similarity));
    conflicts.truncate(MAX_CONFLICTS);
    conflicts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{AgentDescriptor, AgentExecution, AgentRole};

    fn fact(agent: &str, text: &str) -> Fact {
        let desc = AgentDescriptor::new(agent, agent, AgentRole::Analyst, "model");
        let exec = AgentExecution::completed(&desc, "model", text, 1);
        Fact::from_execution(text, &exec)
    }

    #[test]
    fn test_negation_conflict() {
        let facts = vec![
            fact("a", "The new policy reduced average commute times in the city"),
            fact("b", "The new policy did not reduce average commute times"),
        ];
        let conflicts = detect_conflicts(&facts);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].kind, ConflictKind::Negation);
        assert_eq!(conflicts[0].left.agent, "a");
    }

    #[test]
    fn test_numeric_conflict() {
        let facts = vec![
            fact("a", "Quarterly revenue grew 12% compared with last year"),
            fact("b", "Quarterly revenue grew 8.5% compared with the prior period"),
        ];
        let conflicts = detect_conflicts(&facts);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].kind, ConflictKind::Numeric);
    }

    #[test]
    fn test_same_agent_pairs_ignored() {
        let facts = vec![
            fact("a", "The new policy reduced average commute times in the city"),
            fact("a", "The new policy did not reduce average commute times"),
        ];
        assert!(detect_conflicts(&facts).is_empty());
    }

    #[test]
    fn test_unrelated_facts_ignored() {
        let facts = vec![
            fact("a", "Rust was first released in 2015 by Mozilla"),
            fact("b", "Bananas are not a good source of protein"),
        ];
        assert!(detect_conflicts(&facts).is_empty());
    }

    #[test]
    fn test_numbers_extraction() {
        let set = numbers("grew 12% to 3.5 billion in 2024.");
        assert_eq!(
            set.into_iter().collect::<Vec<_>>(),
            vec!["12".to_string(), "2024".to_string(), "3.5".to_string()]
        );
    }
}
