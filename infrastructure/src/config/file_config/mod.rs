//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod output;
mod pipeline;
mod providers;

pub use output::{FileLoggingConfig, FileOutputConfig, FileOutputFormat};
pub use pipeline::FilePipelineConfig;
pub use providers::{
    FileEndpointConfig, FileOpenAiConfig, FileOpenRouterConfig, FileProvidersConfig, OPENAI,
    OPENROUTER,
};

use serde::{Deserialize, Serialize};
use swarm_domain::ConfigIssue;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Call budgets and default mode
    pub pipeline: FilePipelineConfig,
    /// Chat-completions endpoints and model routing
    pub providers: FileProvidersConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// JSONL persistence
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Checks zero timeouts and token budgets, empty base URLs, and provider
    /// names that do not exist.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        self.pipeline.validate(&mut issues);
        self.providers.validate(&mut issues);
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swarm_domain::{OutputFormat, RunMode};

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[pipeline]
mode = "deep"
standard_timeout_secs = 30
deep_max_tokens = 3000

[providers]
default = "openai"

[providers.routing]
"openai/gpt-4o-mini" = "openai"

[output]
format = "full"
color = false
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.pipeline.mode, RunMode::Deep);
        assert_eq!(config.pipeline.standard_timeout_secs, 30);
        assert_eq!(config.pipeline.deep_timeout_secs, 120);
        assert_eq!(config.pipeline.deep_max_tokens, 3000);
        assert_eq!(config.providers.default, "openai");
        assert_eq!(
            config.providers.routing.get("openai/gpt-4o-mini"),
            Some(&"openai".to_string())
        );
        assert_eq!(config.output.format, Some(OutputFormat::Full));
        assert!(!config.output.color);
    }

    #[test]
    fn test_deserialize_empty_config() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn test_validate_valid_config() {
        let config = FileConfig::default();
        assert!(config.validate().is_empty());
    }
}
