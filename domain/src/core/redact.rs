//! Secret scrubbing for every string that leaves the pipeline.
//!
//! Provider API keys occasionally leak into error bodies (echoed request
//! headers, misconfigured proxies) and progress events may be shown to an
//! end user, so anything handed to a progress sink or returned in an error
//! goes through [`redact`] first.

use std::sync::OnceLock;

use regex::Regex;

/// Replacement marker for scrubbed secrets.
pub const REDACTION_MARKER: &str = "[REDACTED]";

fn secret_patterns() -> &'static Regex {
    static PATTERNS: OnceLock<Regex> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        // sk- covers OpenAI, Anthropic (sk-ant-) and OpenRouter (sk-or-) keys.
        Regex::new(concat!(
            r"sk-[A-Za-z0-9_\-]{10,}",
            r"|gsk_[A-Za-z0-9]{10,}",
            r"|xai-[A-Za-z0-9]{10,}",
            r"|AIza[0-9A-Za-z_\-]{10,}",
            r"|(?i:bearer)\s+[A-Za-z0-9._\-]{10,}",
        ))
        .unwrap_or_else(|e| panic!("invalid secret pattern: {e}"))
    })
}

/// Replace every provider-key-shaped substring with [`REDACTION_MARKER`].
///
/// # Example
///
/// ```
/// use swarm_domain::redact;
///
/// assert_eq!(
///     redact("401: invalid key sk-abcdefghij1234"),
///     "401: invalid key [REDACTED]"
/// );
/// ```
pub fn redact(input: &str) -> String {
    secret_patterns()
        .replace_all(input, REDACTION_MARKER)
        .into_owned()
}

/// Redact an optional string in place.
pub fn redact_opt(input: Option<&str>) -> Option<String> {
    input.map(redact)
}

/// Check whether a string still contains anything secret-shaped.
pub fn contains_secret(input: &str) -> bool {
    secret_patterns().is_match(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redacts_openai_style_key() {
        let s = "request failed with key sk-ABCDEFGHIJ in header";
        assert_eq!(redact(s), "request failed with key [REDACTED] in header");
    }

    #[test]
    fn test_redacts_provider_prefixes() {
        let s = "keys: sk-ant-api03-abcdefghijkl sk-or-v1-0123456789ab gsk_abcdefghijkl xai-abcdefghijkl AIzaSyA0123456789";
        let out = redact(s);
        assert!(!contains_secret(&out));
        assert_eq!(out.matches(REDACTION_MARKER).count(), 5);
    }

    #[test]
    fn test_redacts_bearer_token() {
        let out = redact("Authorization: Bearer abc.def-ghi_jklmnop");
        assert_eq!(out, "Authorization: [REDACTED]");
    }

    #[test]
    fn test_short_sk_prefix_untouched() {
        // fewer than 10 trailing chars is not key-shaped
        assert_eq!(redact("task-sk-123"), "task-sk-123");
        assert_eq!(redact("risk-free"), "risk-free");
    }

    #[test]
    fn test_redact_opt() {
        assert_eq!(redact_opt(None), None);
        assert_eq!(
            redact_opt(Some("sk-0123456789")),
            Some(REDACTION_MARKER.to_string())
        );
    }
}
