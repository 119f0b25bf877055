//! Configuration file loading for panel-consensus
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `PANEL_` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./panel-consensus.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/panel-consensus/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileConfig, FileEndpointConfig, FileLoggingConfig, FileOpenAiConfig, FileOpenRouterConfig,
    FileOutputConfig, FileOutputFormat, FilePipelineConfig, FileProvidersConfig, OPENAI,
    OPENROUTER,
};
pub use loader::{ConfigLoader, ENV_PREFIX, PROJECT_CONFIG_FILE};
