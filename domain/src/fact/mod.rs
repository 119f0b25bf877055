//! Fact extraction and cross-agent agreement.
//!
//! - [`extract`]: segments agent text into candidate claims
//! - [`tokens`]: normalized token sets used for similarity
//! - [`agreement`]: Jaccard agreement and confidence scoring

pub mod agreement;
pub mod entities;
pub mod extract;
pub mod tokens;

pub use agreement::{AGREEMENT_THRESHOLD, jaccard, score_facts};
pub use entities::Fact;
pub use extract::extract_facts;
pub use tokens::{normalized_tokens, token_set};
