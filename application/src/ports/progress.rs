//! Progress sink port
//!
//! Every stage reports to a [`ProgressSink`]; nothing reads results back
//! from it. The sink is injected per run rather than held globally, so tests
//! can capture the exact event sequence.

use std::sync::Mutex;
use swarm_domain::ProgressEvent;

/// Receiver of progress events during a pipeline run
///
/// Implementations live in the presentation layer (terminal display) and
/// the infrastructure layer (JSONL persistence). Events arrive already
/// redacted. Emission must not fail or block for long.
pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: ProgressEvent);
}

/// No-op sink for when progress reporting is not needed
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn emit(&self, _event: ProgressEvent) {}
}

/// Sink that keeps every event in memory, in emission order
#[derive(Default)]
pub struct CollectingProgress {
    events: Mutex<Vec<ProgressEvent>>,
}

impl CollectingProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events received so far
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.events.lock().map(|events| events.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ProgressSink for CollectingProgress {
    fn emit(&self, event: ProgressEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}
