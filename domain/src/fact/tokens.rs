//! Token normalization for similarity scoring.
//!
//! Tokens are lower-cased words with markdown emphasis and punctuation
//! stripped, keeping only words of three or more characters. They are never
//! displayed.

use std::collections::BTreeSet;

/// Minimum token length (in characters) kept for similarity.
pub const MIN_TOKEN_CHARS: usize = 3;

/// Ordered normalized tokens of `text` (duplicates kept).
///
/// Synthesis uses the ordered form to build cluster keys; agreement scoring
/// uses the set form from [`token_set`].
pub fn normalized_tokens(text: &str) -> Vec<String> {
    let cleaned: String = text
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .to_lowercase();

    cleaned
        .split_whitespace()
        .filter(|w| w.chars().count() >= MIN_TOKEN_CHARS)
        .map(str::to_string)
        .collect()
}

/// Set of normalized tokens of `text`.
pub fn token_set(text: &str) -> BTreeSet<String> {
    normalized_tokens(text).into_iter().collect()
}
