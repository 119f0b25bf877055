//! Fact extraction: segment agent responses into atomic claims.
//!
//! Pipeline per response: normalize whitespace, split into sentence-like
//! segments, split over-long segments on clause boundaries, keep segments
//! inside the accepted length band.

use super::agreement::score_facts;
use super::entities::Fact;
use crate::agent::AgentExecution;
use crate::core::error::DomainError;
use regex::Regex;
use std::sync::OnceLock;

/// Segments longer than this are split further on `;` / `,` clause breaks.
pub const MAX_SEGMENT_CHARS: usize = 220;
/// Shortest accepted fact, in characters.
pub const MIN_FACT_CHARS: usize = 24;
/// Longest accepted fact, in characters.
pub const MAX_FACT_CHARS: usize = 320;

fn list_marker() -> &'static Regex {
    static MARKER: OnceLock<Regex> = OnceLock::new();
    MARKER.get_or_init(|| {
        Regex::new(r"^(?:[-*•+]\s+|\d{1,3}[.)]\s+|#{1,6}\s+|>\s*)+")
            .unwrap_or_else(|e| panic!("invalid list marker pattern: {e}"))
    })
}

/// Unify line endings, collapse horizontal whitespace runs, trim.
pub fn normalize_text(text: &str) -> String {
    let unified = text.replace("\r\n", "\n").replace('\r', "\n");
    unified
        .lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Remove leading bullets, numbering, headings and quote markers.
pub fn strip_list_marker(line: &str) -> &str {
    let trimmed = line.trim_start();
    match list_marker().find(trimmed) {
        Some(m) => &trimmed[m.end()..],
        None => trimmed,
    }
}

/// Split on sentence-terminal punctuation followed by whitespace.
fn split_sentences(line: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut chars = line.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        if matches!(c, '.' | '!' | '?')
            && let Some(&(_, next)) = chars.peek()
            && next.is_whitespace()
        {
            let end = idx + c.len_utf8();
            parts.push(&line[start..end]);
            start = end;
        }
    }
    if start < line.len() {
        parts.push(&line[start..]);
    }

    parts
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Split a long segment on `;` or `,` followed by whitespace and a capital
/// letter or digit. The delimiter itself is dropped.
fn split_clauses(segment: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let chars: Vec<(usize, char)> = segment.char_indices().collect();

    let mut i = 0;
    while i < chars.len() {
        let (idx, c) = chars[i];
        if matches!(c, ';' | ',') {
            let mut j = i + 1;
            while j < chars.len() && chars[j].1.is_whitespace() {
                j += 1;
            }
            if j > i + 1
                && j < chars.len()
                && (chars[j].1.is_uppercase() || chars[j].1.is_ascii_digit())
            {
                parts.push(&segment[start..idx]);
                start = chars[j].0;
                i = j;
                continue;
            }
        }
        i += 1;
    }
    parts.push(&segment[start..]);

    parts
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Split normalized text into candidate segments (before length filtering).
pub fn split_segments(text: &str) -> Vec<String> {
    let normalized = normalize_text(text);
    let mut segments = Vec::new();

    for line in normalized.lines() {
        let line = strip_list_marker(line);
        if line.is_empty() {
            continue;
        }
        for sentence in split_sentences(line) {
            let sentence = strip_list_marker(sentence);
            if sentence.chars().count() > MAX_SEGMENT_CHARS {
                segments.extend(split_clauses(sentence).into_iter().map(str::to_string));
            } else if !sentence.is_empty() {
                segments.push(sentence.to_string());
            }
        }
    }

    segments
}

/// Whether a segment falls inside the accepted length band.
pub fn is_accepted_length(segment: &str) -> bool {
    let len = segment.chars().count();
    (MIN_FACT_CHARS..=MAX_FACT_CHARS).contains(&len)
}

/// Extract and score facts from the completed executions.
///
/// Fails with [`DomainError::NoExecutions`] when given nothing at all and
/// with [`DomainError::NoFacts`] when no segment survives filtering. The
/// result is ordered by confidence, descending; ties keep extraction order.
pub fn extract_facts(executions: &[AgentExecution]) -> Result<Vec<Fact>, DomainError> {
    if executions.is_empty() {
        return Err(DomainError::NoExecutions);
    }

    let completed: Vec<&AgentExecution> = executions.iter().filter(|e| e.is_completed()).collect();
    let mut facts: Vec<Fact> = Vec::new();

    for execution in &completed {
        for segment in split_segments(&execution.content) {
            if is_accepted_length(&segment) {
                facts.push(Fact::from_execution(segment, execution));
            }
        }
    }

    if facts.is_empty() {
        return Err(DomainError::NoFacts {
            executions: completed.len(),
        });
    }

    score_facts(&mut facts);
    facts.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    Ok(facts)
}
