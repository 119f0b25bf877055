//! Port for structured run transcripts.
//!
//! Defines the [`TranscriptLogger`] trait for recording model calls and run
//! outcomes to a machine-readable log (JSONL).
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures one record
//! per model attempt for later analysis.

use serde_json::Value;

/// A structured transcript event.
///
/// Each event has a type string and a JSON payload with event-specific
/// fields. Adapters add the timestamp when they write the record.
pub struct TranscriptEvent {
    /// Event type identifier (e.g., "model_attempt", "run_completed").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl TranscriptEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging transcript events.
///
/// Implementations write each event as a single record (e.g., one JSONL line).
/// The `log` method is synchronous and non-fallible so a broken log file
/// never fails a run; write errors are dropped.
pub trait TranscriptLogger: Send + Sync {
    fn log(&self, event: TranscriptEvent);
}

/// No-op implementation for tests and when transcripts are disabled.
pub struct NoTranscriptLogger;

impl TranscriptLogger for NoTranscriptLogger {
    fn log(&self, _event: TranscriptEvent) {}
}
