//! Weighted scoring and near-duplicate clustering of facts.

use crate::core::string::clamp01;
use crate::fact::{Fact, normalized_tokens};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Number of leading normalized tokens forming a cluster key.
pub const CLUSTER_KEY_TOKENS: usize = 7;
/// Maximum number of findings kept after clustering.
pub const MAX_FINDINGS: usize = 22;

/// A fact weighted by its source role for synthesis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredFact {
    #[serde(flatten)]
    pub fact: Fact,
    pub specialty_weight: f64,
    pub composite_score: f64,
}

impl ScoredFact {
    pub fn new(fact: Fact) -> Self {
        let specialty_weight = fact.source_role.specialty_weight();
        let composite_score = clamp01(fact.confidence * specialty_weight);
        Self {
            fact,
            specialty_weight,
            composite_score,
        }
    }
}

/// Attach specialty weights and composite scores.
pub fn score_for_synthesis(facts: &[Fact]) -> Vec<ScoredFact> {
    facts.iter().cloned().map(ScoredFact::new).collect()
}

/// Key shared by facts that open with the same words.
///
/// Built from the ordered token list so that word order matters.
pub fn cluster_key(text: &str) -> String {
    normalized_tokens(text)
        .into_iter()
        .take(CLUSTER_KEY_TOKENS)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Keep the highest-scoring fact per cluster, ordered by composite score.
///
/// Ties keep the earlier fact. Applying this twice yields the same result
/// as applying it once.
pub fn cluster(scored: Vec<ScoredFact>) -> Vec<ScoredFact> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut kept: Vec<ScoredFact> = Vec::new();

    for candidate in scored {
        let key = cluster_key(&candidate.fact.text);
        match index.get(&key) {
            Some(&i) => {
                if candidate.composite_score > kept[i].composite_score {
                    kept[i] = candidate;
                }
            }
            None => {
                index.insert(key, kept.len());
                kept.push(candidate);
            }
        }
    }

    kept.sort_by(|a, b| b.composite_score.total_cmp(&a.composite_score));
    kept
}

/// Score, cluster and keep the top findings.
pub fn rank_findings(facts: &[Fact]) -> Vec<ScoredFact> {
    let mut findings = cluster(score_for_synthesis(facts));
    findings.truncate(MAX_FINDINGS);
    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{AgentDescriptor, AgentExecution, AgentRole};

    fn fact(agent: &str, role: AgentRole, text: &str, confidence: f64) -> Fact {
        let desc = AgentDescriptor::new(agent, agent, role, "model");
        let exec = AgentExecution::completed(&desc, "model", text, 1);
        let mut f = Fact::from_execution(text, &exec);
        f.confidence = confidence;
        f
    }

    #[test]
    fn test_composite_is_weighted_and_clamped() {
        let researcher = ScoredFact::new(fact("r", AgentRole::Researcher, "Some researched claim here", 0.95));
        assert_eq!(researcher.specialty_weight, 1.15);
        assert_eq!(researcher.composite_score, 1.0);

        let generalist = ScoredFact::new(fact("g", AgentRole::Generalist, "Some general claim here", 0.5));
        assert!((generalist.composite_score - 0.45).abs() < 1e-9);
    }

    #[test]
    fn test_cluster_key_uses_first_seven_tokens_in_order() {
        assert_eq!(
            cluster_key("The quick brown fox jumps over the lazy dog again"),
            "the quick brown fox jumps over the"
        );
        assert_ne!(
            cluster_key("fox brown quick the"),
            cluster_key("the quick brown fox")
        );
    }

    #[test]
    fn test_cluster_keeps_best_per_key() {
        let scored = score_for_synthesis(&[
            fact("a", AgentRole::Analyst, "Rust programs compile to native code quickly and safely.", 0.5),
            fact("b", AgentRole::Analyst, "Rust programs compile to native code quickly and safely!", 0.8),
            fact("c", AgentRole::Analyst, "Garbage collection is absent from the language runtime.", 0.6),
        ]);
        let clustered = cluster(scored);
        assert_eq!(clustered.len(), 2);
        assert_eq!(clustered[0].fact.source_agent, "b");
        assert_eq!(clustered[1].fact.source_agent, "c");
    }

    #[test]
    fn test_cluster_is_idempotent() {
        let scored = score_for_synthesis(&[
            fact("a", AgentRole::Skeptic, "Inflation eased during the second half of the year.", 0.4),
            fact("b", AgentRole::Analyst, "Inflation eased during the second half of the year overall.", 0.7),
            fact("c", AgentRole::Researcher, "Wages rose faster than prices in most sectors.", 0.7),
            fact("d", AgentRole::Generalist, "Housing costs remained the largest household expense.", 0.3),
        ]);
        let once = cluster(scored);
        let twice = cluster(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_rank_findings_caps_output() {
        let facts: Vec<Fact> = (0..40)
            .map(|i| {
                fact(
                    "a",
                    AgentRole::Analyst,
                    &format!("Distinct claim number {i:03} about the subject matter"),
                    0.5,
                )
            })
            .collect();
        assert_eq!(rank_findings(&facts).len(), MAX_FINDINGS);
    }
}
