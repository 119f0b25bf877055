//! Logging infrastructure: structured JSONL persistence.
//!
//! Provides [`JsonlTranscriptLogger`] (implements the
//! [`TranscriptLogger`](swarm_application::TranscriptLogger) port) and
//! [`JsonlEventSink`] (implements [`ProgressSink`](swarm_application::ProgressSink)).

mod jsonl_logger;

pub use jsonl_logger::{JsonlEventSink, JsonlTranscriptLogger};
