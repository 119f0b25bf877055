//! Cross-agent agreement scoring.
//!
//! Confidence blends three signals:
//!
//! ```text
//! confidence = clamp01(0.15 + reliability * 0.55 + agreement * 0.35 + length * 0.10)
//! agreement  = clamp01(distinct_agreeing_agents / 4)
//! length     = clamp01((token_count - 6) / 18)
//! ```
//!
//! Two facts agree when their token sets have Jaccard similarity of at least
//! [`AGREEMENT_THRESHOLD`] and they come from different agents. Scoring is an
//! all-pairs comparison; per-run fact counts stay in the low hundreds.

use super::entities::Fact;
use crate::core::string::clamp01;
use std::collections::BTreeSet;

/// Minimum Jaccard similarity for two facts to count as agreeing.
pub const AGREEMENT_THRESHOLD: f64 = 0.72;
/// Number of independent corroborators at which agreement saturates.
pub const AGREEMENT_SATURATION: f64 = 4.0;

const BASE_CONFIDENCE: f64 = 0.15;
const RELIABILITY_WEIGHT: f64 = 0.55;
const AGREEMENT_WEIGHT: f64 = 0.35;
const LENGTH_WEIGHT: f64 = 0.10;

/// Jaccard index of two token sets; 0 if either is empty.
pub fn jaccard(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    intersection as f64 / union as f64
}

/// Whether two facts corroborate each other. Same-agent pairs never agree.
pub fn agrees(a: &Fact, b: &Fact) -> bool {
    a.source_agent != b.source_agent && jaccard(&a.token_set, &b.token_set) >= AGREEMENT_THRESHOLD
}

/// Mild bonus for substantive (not terse) claims.
pub fn length_factor(token_count: usize) -> f64 {
    clamp01((token_count as f64 - 6.0) / 18.0)
}

/// Agreement signal from the number of distinct corroborating agents.
pub fn agreement_score(distinct_agreeing: usize) -> f64 {
    clamp01(distinct_agreeing as f64 / AGREEMENT_SATURATION)
}

/// Combine the three signals into a confidence in `[0, 1]`.
pub fn confidence(reliability: f64, distinct_agreeing: usize, token_count: usize) -> f64 {
    clamp01(
        BASE_CONFIDENCE
            + reliability * RELIABILITY_WEIGHT
            + agreement_score(distinct_agreeing) * AGREEMENT_WEIGHT
            + length_factor(token_count) * LENGTH_WEIGHT,
    )
}

/// Fill in agreement and confidence for every fact, in place.
pub fn score_facts(facts: &mut [Fact]) {
    let agreeing: Vec<BTreeSet<String>> = facts
        .iter()
        .enumerate()
        .map(|(i, fact)| {
            facts
                .iter()
                .enumerate()
                .filter(|(j, other)| *j != i && agrees(fact, other))
                .map(|(_, other)| other.source_agent.clone())
                .collect()
        })
        .collect();

    for (fact, agents) in facts.iter_mut().zip(agreeing) {
        fact.agreeing_agent_count = agents.len();
        fact.confidence = confidence(
            fact.source_role.reliability(),
            agents.len(),
            fact.token_count(),
        );
        fact.agreeing_agents = agents;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{AgentDescriptor, AgentExecution, AgentRole};
    use crate::fact::tokens::token_set;

    fn fact(agent: &str, role: AgentRole, text: &str) -> Fact {
        let desc = AgentDescriptor::new(agent, agent, role, "model");
        let exec = AgentExecution::completed(&desc, "model", text, 1);
        Fact::from_execution(text, &exec)
    }

    #[test]
    fn test_jaccard_identity_and_symmetry() {
        let a = token_set("Revenue grew twelve percent year over year");
        let b = token_set("Revenue grew strongly over the prior year");
        assert_eq!(jaccard(&a, &a), 1.0);
        assert_eq!(jaccard(&a, &b), jaccard(&b, &a));
        assert!(jaccard(&a, &b) > 0.0 && jaccard(&a, &b) < 1.0);
    }

    #[test]
    fn test_jaccard_empty_is_zero() {
        let a = token_set("Revenue grew");
        let empty = BTreeSet::new();
        assert_eq!(jaccard(&a, &empty), 0.0);
        assert_eq!(jaccard(&empty, &empty), 0.0);
    }

    #[test]
    fn test_length_factor_bounds() {
        assert_eq!(length_factor(0), 0.0);
        assert_eq!(length_factor(6), 0.0);
        assert!((length_factor(15) - 0.5).abs() < 1e-9);
        assert_eq!(length_factor(24), 1.0);
        assert_eq!(length_factor(100), 1.0);
    }

    #[test]
    fn test_agreement_saturates_at_four() {
        assert_eq!(agreement_score(0), 0.0);
        assert_eq!(agreement_score(2), 0.5);
        assert_eq!(agreement_score(4), 1.0);
        assert_eq!(agreement_score(9), 1.0);
    }

    #[test]
    fn test_confidence_clamped() {
        assert!(confidence(1.0, 10, 100) <= 1.0);
        assert!(confidence(0.0, 0, 0) >= 0.0);
        assert!((confidence(0.6, 0, 0) - 0.48).abs() < 1e-9);
    }

    #[test]
    fn test_shared_sentence_agrees_across_agents() {
        let mut facts = vec![
            fact("analyst", AgentRole::Analyst, "Revenue grew 12% year over year."),
            fact("researcher", AgentRole::Researcher, "Revenue grew 12% year over year."),
        ];
        let before = confidence(AgentRole::Analyst.reliability(), 0, facts[0].token_count());
        assert!(jaccard(&facts[0].token_set, &facts[1].token_set) >= AGREEMENT_THRESHOLD);

        score_facts(&mut facts);

        assert_eq!(facts[0].agreeing_agent_count, 1);
        assert_eq!(facts[1].agreeing_agent_count, 1);
        assert!(facts[0].agreeing_agents.contains("researcher"));
        assert!(facts[0].confidence > before);
    }

    #[test]
    fn test_same_agent_never_self_agrees() {
        let mut facts = vec![
            fact("analyst", AgentRole::Analyst, "Revenue grew 12% year over year."),
            fact("analyst", AgentRole::Analyst, "Revenue grew 12% year over year!"),
            fact("skeptic", AgentRole::Skeptic, "Revenue grew 12% year over year."),
        ];
        score_facts(&mut facts);

        for f in &facts {
            assert!(!f.agreeing_agents.contains(&f.source_agent));
        }
        // two analyst facts both see the skeptic; skeptic sees one distinct agent
        assert_eq!(facts[0].agreeing_agent_count, 1);
        assert_eq!(facts[2].agreeing_agent_count, 1);
    }

    #[test]
    fn test_scores_always_in_unit_interval() {
        let mut facts: Vec<Fact> = (0..6)
            .map(|i| {
                fact(
                    &format!("agent-{i}"),
                    AgentRole::Researcher,
                    "Rust guarantees memory safety without garbage collection through ownership, borrowing, lifetimes and strict compile time checks of every reference",
                )
            })
            .collect();
        score_facts(&mut facts);
        for f in &facts {
            assert!((0.0..=1.0).contains(&f.confidence));
            assert_eq!(f.agreeing_agent_count, 5);
        }
    }
}
