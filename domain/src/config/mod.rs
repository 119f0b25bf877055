//! Configuration value objects for the domain layer
//!
//! These are domain concepts related to configuration that are
//! used across multiple layers.

mod issue;
mod output_format;

pub use issue::{ConfigIssue, ConfigIssueCode, Severity, has_errors};
pub use output_format::OutputFormat;
