//! Structured configuration issues.
//!
//! Config validation never fails fast: it collects every [`ConfigIssue`] so
//! the CLI can print them all at once and decide whether any is fatal.

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// A timeout was configured as zero seconds.
    ZeroTimeout { field: String },
    /// A provider base URL is empty.
    EmptyBaseUrl { provider: String },
    /// A routing entry names a provider that does not exist.
    UnknownProvider { model: String, provider: String },
    /// Token budget is zero.
    ZeroMaxTokens { field: String },
}

/// A detected configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Check whether any issue is fatal.
pub fn has_errors(issues: &[ConfigIssue]) -> bool {
    issues.iter().any(ConfigIssue::is_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_errors() {
        let warn = ConfigIssue::warning(
            ConfigIssueCode::EmptyBaseUrl {
                provider: "openai".to_string(),
            },
            "empty",
        );
        assert!(!has_errors(std::slice::from_ref(&warn)));

        let err = ConfigIssue::error(
            ConfigIssueCode::ZeroTimeout {
                field: "pipeline.standard_timeout_secs".to_string(),
            },
            "zero",
        );
        assert!(has_errors(&[warn, err]));
    }
}
