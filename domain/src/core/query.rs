//! Query value object

use serde::{Deserialize, Serialize};

/// The user query fanned out to every agent on the panel (Value Object)
///
/// A `Query` is never blank: construction goes through [`Query::parse`],
/// which trims surrounding whitespace and rejects empty input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Query {
    content: String,
}

impl Query {
    /// Parse a query, returning `None` when it is empty or whitespace only.
    pub fn parse(content: impl AsRef<str>) -> Option<Self> {
        let trimmed = content.as_ref().trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self {
                content: trimmed.to_string(),
            })
        }
    }

    /// Get the query text
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume and return the inner text
    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}
