//! Output guard applied to the refined draft and to the final report.
//!
//! Redacts credentials, removes script blocks and raw HTML tags, collapses
//! runs of blank lines and caps the length.

use crate::core::redact::redact;
use regex::Regex;
use std::sync::OnceLock;

/// Maximum length of guarded output, in characters.
pub const MAX_GUARDED_CHARS: usize = 12_000;

struct Patterns {
    script: Regex,
    tag: Regex,
    blank_runs: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        let compile = |p: &str| {
            Regex::new(p).unwrap_or_else(|e| panic!("invalid guard pattern {p}: {e}"))
        };
        Patterns {
            script: compile(r"(?is)<script\b.*?</script\s*>"),
            tag: compile(r"</?[A-Za-z][A-Za-z0-9-]*(?:\s[^<>]*)?/?>"),
            blank_runs: compile(r"\n[ \t]*\n(?:[ \t]*\n)+"),
        }
    })
}

/// Truncate to at most `max_chars` characters.
fn cap_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Make text safe to hand to the user.
pub fn guard(text: &str) -> String {
    let p = patterns();
    let redacted = redact(text);
    let no_script = p.script.replace_all(&redacted, "");
    let no_tags = p.tag.replace_all(&no_script, "");
    let collapsed = p.blank_runs.replace_all(&no_tags, "\n\n");
    cap_chars(collapsed.trim(), MAX_GUARDED_CHARS).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::redact::REDACTION_MARKER;

    #[test]
    fn test_redacts_secrets() {
        let out = guard("token sk-abcdefghijklmnop123 leaked");
        assert!(out.contains(REDACTION_MARKER));
        assert!(!out.contains("sk-abcdefghijklmnop123"));
    }

    #[test]
    fn test_strips_script_and_tags() {
        let out = guard("Hello <b>world</b><SCRIPT type=\"x\">\nalert(1)\n</script> done");
        assert_eq!(out, "Hello world done");
    }

    #[test]
    fn test_keeps_comparisons() {
        assert_eq!(guard("a < b and c > d"), "a < b and c > d");
    }

    #[test]
    fn test_collapses_blank_lines() {
        assert_eq!(guard("one\n\n\n\n  \ntwo\n\nthree"), "one\n\ntwo\n\nthree");
    }

    #[test]
    fn test_caps_length_on_char_boundary() {
        let long = "é".repeat(MAX_GUARDED_CHARS + 50);
        let out = guard(&long);
        assert_eq!(out.chars().count(), MAX_GUARDED_CHARS);
    }
}
