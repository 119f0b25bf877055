//! Support check of synthesized findings and the refine pass that marks
//! unsupported ones in the draft.

pub mod refine;

pub use refine::refine;

use crate::synthesis::{ConsensusDocument, ScoredFact};
use serde::{Deserialize, Serialize};

/// Confidence at or above which a lone finding counts as supported.
pub const SUPPORT_CONFIDENCE: f64 = 0.60;

/// Which findings are corroborated.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VerificationReport {
    pub supported: Vec<String>,
    pub unsupported: Vec<String>,
}

impl VerificationReport {
    pub fn total(&self) -> usize {
        self.supported.len() + self.unsupported.len()
    }
}

/// A finding is supported when another agent agrees with it or its own
/// confidence is high enough.
pub fn is_supported(finding: &ScoredFact) -> bool {
    finding.fact.agreeing_agent_count >= 1 || finding.fact.confidence >= SUPPORT_CONFIDENCE
}

/// Partition the document's findings by support.
pub fn verify(document: &ConsensusDocument) -> VerificationReport {
    let (supported, unsupported): (Vec<&ScoredFact>, Vec<&ScoredFact>) =
        document.findings.iter().partition(|f| is_supported(f));

    VerificationReport {
        supported: supported.into_iter().map(|f| f.fact.text.clone()).collect(),
        unsupported: unsupported.into_iter().map(|f| f.fact.text.clone()).collect(),
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::document;
    use super::*;

    #[test]
    fn test_verify_partitions_findings() {
        let report = verify(&document());
        assert_eq!(report.total(), 3);
        assert_eq!(report.supported.len(), 2);
        assert_eq!(
            report.unsupported,
            vec!["Battery prices might fall further next decade.".to_string()]
        );
    }
}
