//! Infrastructure layer for panel-consensus
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the HTTP chat-completions gateway, JSONL
//! persistence, and configuration file loading.

pub mod config;
pub mod logging;
pub mod providers;

// Re-export commonly used types
pub use config::{
    ConfigLoader, FileConfig, FileLoggingConfig, FileOutputConfig, FileOutputFormat,
    FilePipelineConfig, FileProvidersConfig,
};
pub use logging::{JsonlEventSink, JsonlTranscriptLogger};
pub use providers::{
    ProviderAdapter, openai::OpenAiCompatibleProvider, routing::RoutingGateway,
};
