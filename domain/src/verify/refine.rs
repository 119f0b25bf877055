//! Refine pass over the consensus draft.

use super::{VerificationReport, is_supported};
use crate::synthesis::{ConsensusDocument, finding_line};
use std::collections::HashSet;

/// Suffix appended to unsupported finding bullets.
pub const UNVERIFIED_MARK: &str = " _(unverified)_";
pub const VERIFICATION_HEADING: &str = "## Verification";

/// Mark unsupported findings and append a verification summary.
pub fn refine(document: &ConsensusDocument, report: &VerificationReport) -> String {
    let flagged: HashSet<String> = document
        .findings
        .iter()
        .filter(|f| !is_supported(f))
        .map(finding_line)
        .collect();

    let mut out: Vec<String> = document
        .markdown
        .lines()
        .map(|line| {
            if flagged.contains(line) {
                format!("{line}{UNVERIFIED_MARK}")
            } else {
                line.to_string()
            }
        })
        .collect();

    out.push(String::new());
    out.push(VERIFICATION_HEADING.to_string());
    out.push(String::new());
    out.push(format!("- Supported findings: {}", report.supported.len()));
    out.push(format!("- Unverified findings: {}", report.unsupported.len()));

    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verify::test_support::document;
    use crate::verify::verify;

    #[test]
    fn test_refine_marks_unsupported_only() {
        let doc = document();
        let refined = refine(&doc, &verify(&doc));

        let marked: Vec<&str> = refined
            .lines()
            .filter(|l| l.ends_with(UNVERIFIED_MARK))
            .collect();
        assert_eq!(marked.len(), 1);
        assert!(marked[0].starts_with("- Battery prices"));
    }

    #[test]
    fn test_refine_appends_summary() {
        let doc = document();
        let refined = refine(&doc, &verify(&doc));
        assert!(refined.contains(VERIFICATION_HEADING));
        assert!(refined.contains("- Supported findings: 2"));
        assert!(refined.ends_with("- Unverified findings: 1"));
        assert!(refined.starts_with("## Short Answer"));
    }
}
