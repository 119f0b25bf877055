//! Agent descriptor value object.

use super::role::AgentRole;
use serde::{Deserialize, Serialize};

/// One configured (model, role) pair on the panel.
///
/// Descriptors are immutable once the roster is built. The
/// [`attempt_chain`](AgentDescriptor::attempt_chain) is the ordered list of
/// models the dispatcher walks when earlier models fail transiently.
///
/// # Example
///
/// ```
/// use swarm_domain::{AgentDescriptor, AgentRole};
///
/// let agent = AgentDescriptor::new("analyst", "Analyst", AgentRole::Analyst, "openai/gpt-4o")
///     .with_fallbacks(["openai/gpt-4o-mini", "openai/gpt-4o"]);
///
/// assert_eq!(agent.attempt_chain(), vec!["openai/gpt-4o", "openai/gpt-4o-mini"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentDescriptor {
    /// Stable identifier, unique within a roster
    pub id: String,
    /// Human-readable name shown in progress events
    pub display_name: String,
    /// Role used as the key for scoring priors
    pub role: AgentRole,
    /// First model tried
    pub primary_model: String,
    /// Models tried in order after the primary fails transiently
    #[serde(default)]
    pub fallback_models: Vec<String>,
}

impl AgentDescriptor {
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        role: AgentRole,
        primary_model: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            role,
            primary_model: primary_model.into(),
            fallback_models: Vec::new(),
        }
    }

    pub fn with_fallbacks<I, S>(mut self, models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fallback_models = models.into_iter().map(Into::into).collect();
        self
    }

    /// `[primary, ..fallbacks]` with duplicates removed, first occurrence wins.
    pub fn attempt_chain(&self) -> Vec<&str> {
        let mut chain: Vec<&str> = Vec::with_capacity(1 + self.fallback_models.len());
        for model in std::iter::once(&self.primary_model).chain(&self.fallback_models) {
            let model = model.trim();
            if !model.is_empty() && !chain.contains(&model) {
                chain.push(model);
            }
        }
        chain
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attempt_chain_primary_first() {
        let agent = AgentDescriptor::new("a", "A", AgentRole::Analyst, "m1")
            .with_fallbacks(["m2", "m3"]);
        assert_eq!(agent.attempt_chain(), vec!["m1", "m2", "m3"]);
    }

    #[test]
    fn test_attempt_chain_dedupes_preserving_order() {
        let agent = AgentDescriptor::new("a", "A", AgentRole::Analyst, "m1")
            .with_fallbacks(["m2", "m1", "m3", "m2"]);
        assert_eq!(agent.attempt_chain(), vec!["m1", "m2", "m3"]);
    }

    #[test]
    fn test_attempt_chain_without_fallbacks() {
        let agent = AgentDescriptor::new("a", "A", AgentRole::Skeptic, "solo");
        assert_eq!(agent.attempt_chain(), vec!["solo"]);
    }

    #[test]
    fn test_attempt_chain_skips_blank_models() {
        let agent =
            AgentDescriptor::new("a", "A", AgentRole::Skeptic, "m1").with_fallbacks(["", "  "]);
        assert_eq!(agent.attempt_chain(), vec!["m1"]);
    }
}
