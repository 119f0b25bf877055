//! Provider configuration from TOML (`[providers]` section)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use swarm_domain::{ConfigIssue, ConfigIssueCode};

pub const OPENROUTER: &str = "openrouter";
pub const OPENAI: &str = "openai";

/// Resolved settings for one OpenAI-compatible chat-completions endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEndpointConfig {
    pub api_key_env: String,
    pub api_key: Option<String>,
    pub base_url: String,
    pub strip_vendor_prefix: bool,
}

/// OpenRouter provider configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOpenRouterConfig {
    /// Environment variable name for the API key (default: "OPENROUTER_API_KEY").
    pub api_key_env: String,
    /// Direct API key (not recommended; use the env var instead).
    pub api_key: Option<String>,
    /// Base URL without the `/v1/chat/completions` suffix.
    pub base_url: String,
}

impl Default for FileOpenRouterConfig {
    fn default() -> Self {
        Self {
            api_key_env: "OPENROUTER_API_KEY".to_string(),
            api_key: None,
            base_url: "https://openrouter.ai/api".to_string(),
        }
    }
}

/// OpenAI API provider configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOpenAiConfig {
    /// Environment variable name for the API key (default: "OPENAI_API_KEY").
    pub api_key_env: String,
    /// Direct API key (not recommended; use the env var instead).
    pub api_key: Option<String>,
    /// Base URL for the OpenAI API (can be overridden for compatible servers).
    pub base_url: String,
    /// Send `gpt-4o` instead of `openai/gpt-4o`.
    pub strip_vendor_prefix: bool,
}

impl Default for FileOpenAiConfig {
    fn default() -> Self {
        Self {
            api_key_env: "OPENAI_API_KEY".to_string(),
            api_key: None,
            base_url: "https://api.openai.com".to_string(),
            strip_vendor_prefix: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProvidersConfig {
    /// Provider for models without an explicit route: "openrouter" or "openai".
    pub default: String,
    /// OpenRouter settings.
    pub openrouter: FileOpenRouterConfig,
    /// OpenAI settings.
    pub openai: FileOpenAiConfig,
    /// Explicit model → provider routing overrides.
    pub routing: HashMap<String, String>,
}

impl Default for FileProvidersConfig {
    fn default() -> Self {
        Self {
            default: OPENROUTER.to_string(),
            openrouter: FileOpenRouterConfig::default(),
            openai: FileOpenAiConfig::default(),
            routing: HashMap::new(),
        }
    }
}

impl FileProvidersConfig {
    pub fn is_known(name: &str) -> bool {
        matches!(name, OPENROUTER | OPENAI)
    }

    /// Endpoints in registration order, keyed by provider name.
    pub fn endpoints(&self) -> Vec<(&'static str, FileEndpointConfig)> {
        vec![
            (
                OPENROUTER,
                FileEndpointConfig {
                    api_key_env: self.openrouter.api_key_env.clone(),
                    api_key: self.openrouter.api_key.clone(),
                    base_url: self.openrouter.base_url.clone(),
                    strip_vendor_prefix: false,
                },
            ),
            (
                OPENAI,
                FileEndpointConfig {
                    api_key_env: self.openai.api_key_env.clone(),
                    api_key: self.openai.api_key.clone(),
                    base_url: self.openai.base_url.clone(),
                    strip_vendor_prefix: self.openai.strip_vendor_prefix,
                },
            ),
        ]
    }

    pub(super) fn validate(&self, issues: &mut Vec<ConfigIssue>) {
        if !Self::is_known(&self.default) {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::UnknownProvider {
                    model: "*".to_string(),
                    provider: self.default.clone(),
                },
                format!(
                    "providers.default: unknown provider '{}' (expected 'openrouter' or 'openai')",
                    self.default
                ),
            ));
        }

        for (name, endpoint) in self.endpoints() {
            if endpoint.base_url.trim().is_empty() {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::EmptyBaseUrl {
                        provider: name.to_string(),
                    },
                    format!("providers.{name}.base_url cannot be empty"),
                ));
            }
        }

        let mut routes: Vec<_> = self.routing.iter().collect();
        routes.sort();
        for (model, provider) in routes {
            if !Self::is_known(provider) {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::UnknownProvider {
                        model: model.clone(),
                        provider: provider.clone(),
                    },
                    format!(
                        "providers.routing: '{model}' routes to unknown provider '{provider}', ignoring"
                    ),
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_endpoint_keeps_defaults() {
        let toml_str = r#"
[openai]
api_key_env = "MY_OPENAI_KEY"
"#;
        let config: FileProvidersConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.default, "openrouter");
        assert_eq!(config.openai.api_key_env, "MY_OPENAI_KEY");
        assert_eq!(config.openai.base_url, "https://api.openai.com");
        assert!(config.openai.strip_vendor_prefix);
        assert_eq!(config.openrouter, FileOpenRouterConfig::default());
    }

    #[test]
    fn test_unknown_routing_is_warning() {
        let mut config = FileProvidersConfig::default();
        config
            .routing
            .insert("gpt-4o".to_string(), "azure".to_string());
        let mut issues = Vec::new();
        config.validate(&mut issues);
        assert_eq!(issues.len(), 1);
        assert!(!issues[0].is_error());
    }

    #[test]
    fn test_empty_base_url_and_bad_default_are_errors() {
        let mut config = FileProvidersConfig {
            default: "local".to_string(),
            ..Default::default()
        };
        config.openrouter.base_url = "  ".to_string();
        let mut issues = Vec::new();
        config.validate(&mut issues);
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|i| i.is_error()));
    }
}
