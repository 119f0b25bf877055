//! Final report produced by the writer pass.

use crate::critique::extract_json_object;
use serde::{Deserialize, Serialize};

/// Title used when the writer gave none.
pub const DEFAULT_TITLE: &str = "Consensus Report";

/// The user-facing report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalReport {
    pub title: String,
    pub body: String,
    /// Model that wrote the report; `None` when the guarded draft was used
    pub writer_model: Option<String>,
    /// Whether the writer response parsed as the requested JSON shape
    pub structured: bool,
}

impl FinalReport {
    /// Report built directly from the guarded draft after a writer failure.
    pub fn from_draft(draft: impl Into<String>) -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            body: draft.into(),
            writer_model: None,
            structured: false,
        }
    }

    /// Title and body as one markdown document.
    pub fn to_markdown(&self) -> String {
        format!("# {}\n\n{}", self.title, self.body)
    }
}

#[derive(Deserialize)]
struct RawReport {
    #[serde(default)]
    title: String,
    report: String,
}

/// Parsed writer output.
#[derive(Debug, Clone, PartialEq)]
pub struct WriterOutput {
    pub title: String,
    pub body: String,
    pub structured: bool,
}

/// Parse `{"title","report"}` out of the writer response, falling back to
/// the raw text as the body.
pub fn parse_writer_response(response: &str) -> WriterOutput {
    if let Some(json) = extract_json_object(response)
        && let Ok(raw) = serde_json::from_str::<RawReport>(json)
        && !raw.report.trim().is_empty()
    {
        let title = raw.title.trim();
        return WriterOutput {
            title: if title.is_empty() { DEFAULT_TITLE } else { title }.to_string(),
            body: raw.report.trim().to_string(),
            structured: true,
        };
    }

    WriterOutput {
        title: DEFAULT_TITLE.to_string(),
        body: response.trim().to_string(),
        structured: false,
    }
}
