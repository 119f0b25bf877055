//! Weighted synthesis of accepted facts into a consensus draft.
//!
//! - [`cluster`]: specialty weighting, near-duplicate clustering, ranking
//! - [`document`]: short answer and markdown rendering

pub mod cluster;
pub mod document;

pub use cluster::{ScoredFact, cluster, cluster_key, rank_findings, score_for_synthesis};
pub use document::{ConsensusDocument, finding_line, short_answer, synthesize};
