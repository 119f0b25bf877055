//! Composite progress sink: delegates to multiple sinks.
//!
//! Used to fan out run events to both the terminal display and the JSONL
//! event file.

use super::progress::ProgressSink;
use swarm_domain::ProgressEvent;

/// A progress sink that forwards every event to each inner sink.
///
/// Uses borrowed references with a lifetime parameter so both owned and
/// borrowed sinks can be composed without wrapper types.
pub struct CompositeProgress<'a> {
    delegates: Vec<&'a dyn ProgressSink>,
}

impl<'a> CompositeProgress<'a> {
    pub fn new(delegates: Vec<&'a dyn ProgressSink>) -> Self {
        Self { delegates }
    }

    pub fn push(&mut self, sink: &'a dyn ProgressSink) {
        self.delegates.push(sink);
    }
}

impl ProgressSink for CompositeProgress<'_> {
    fn emit(&self, event: ProgressEvent) {
        if let Some((last, rest)) = self.delegates.split_last() {
            for d in rest {
                d.emit(event.clone());
            }
            last.emit(event);
        }
    }
}
