//! Application layer for panel-consensus
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::ExecutionParams;
pub use ports::{
    composite_progress::CompositeProgress,
    llm_gateway::{ChatMessage, ChatRequest, ChatResponse, ChatRole, GatewayError, LlmGateway},
    progress::{CollectingProgress, NoProgress, ProgressSink},
    transcript_logger::{NoTranscriptLogger, TranscriptEvent, TranscriptLogger},
};
pub use use_cases::run_pipeline::{
    ConfigurationError, PipelineError, PipelineOptions, RunPipelineUseCase,
};
