//! JSONL file writers for run transcripts and progress events.
//!
//! Each record is serialized as a single JSON line with a `type` field and
//! `timestamp`, appended to the file via a buffered writer.

use serde_json::Value;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use swarm_application::{ProgressSink, TranscriptEvent, TranscriptLogger};
use swarm_domain::ProgressEvent;
use tracing::warn;

/// Append-only JSONL file shared by the transcript logger and event sink.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes on `Drop`.
struct JsonlFile {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlFile {
    /// Creates the file (and parent directories) if they don't exist.
    fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create JSONL log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match File::create(path) {
            Ok(f) => f,
            Err(e) => {
                warn!(
                    "Could not create JSONL log file {}: {}",
                    path.display(),
                    e
                );
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the log file.
    fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, record: &Value) {
        let Ok(line) = serde_json::to_string(record) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            // JSONL is append-only; flush each line so a crash keeps the prefix
            let _ = writer.flush();
        }
    }
}

fn timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// JSONL transcript logger: one line per model attempt and run outcome.
pub struct JsonlTranscriptLogger {
    file: JsonlFile,
}

impl JsonlTranscriptLogger {
    /// Create a new logger writing to the given path.
    ///
    /// Returns `None` if the file cannot be created.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        JsonlFile::new(path).map(|file| Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

impl TranscriptLogger for JsonlTranscriptLogger {
    fn log(&self, event: TranscriptEvent) {
        let timestamp = timestamp();

        // Build the record: merge payload with type + timestamp
        let record = if let Value::Object(mut map) = event.payload {
            map.insert(
                "type".to_string(),
                Value::String(event.event_type.to_string()),
            );
            map.insert("timestamp".to_string(), Value::String(timestamp));
            Value::Object(map)
        } else {
            serde_json::json!({
                "type": event.event_type,
                "timestamp": timestamp,
                "data": event.payload,
            })
        };

        self.file.write(&record);
    }
}

/// Progress sink persisting every [`ProgressEvent`] as one JSON line.
///
/// Events already carry their own `at` timestamp and `type` tag.
pub struct JsonlEventSink {
    file: JsonlFile,
}

impl JsonlEventSink {
    /// Returns `None` if the file cannot be created.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        JsonlFile::new(path).map(|file| Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

impl ProgressSink for JsonlEventSink {
    fn emit(&self, event: ProgressEvent) {
        match serde_json::to_value(&event) {
            Ok(record) => self.file.write(&record),
            Err(e) => warn!("Could not serialize progress event: {}", e),
        }
    }
}

impl Drop for JsonlFile {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use swarm_domain::Stage;

    fn lines(path: &Path) -> Vec<Value> {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_transcript_logger_writes_valid_jsonl() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.transcript.jsonl");
        let logger = JsonlTranscriptLogger::new(&path).unwrap();

        logger.log(TranscriptEvent::new(
            "model_attempt",
            serde_json::json!({
                "agent": "analyst",
                "model": "openai/gpt-4o",
                "attempt": 1,
                "ok": true
            }),
        ));
        logger.log(TranscriptEvent::new(
            "run_completed",
            serde_json::json!({"run_id": "abc", "duration_ms": 1200}),
        ));
        drop(logger);

        let records = lines(&path);
        assert_eq!(records.len(), 2);
        for record in &records {
            assert!(record.get("type").is_some());
            assert!(record.get("timestamp").is_some());
        }
        assert_eq!(records[0]["type"], "model_attempt");
        assert_eq!(records[0]["model"], "openai/gpt-4o");
        assert_eq!(records[0]["attempt"], 1);
        assert_eq!(records[1]["type"], "run_completed");
    }

    #[test]
    fn test_transcript_logger_handles_non_object_payload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scalar.jsonl");
        let logger = JsonlTranscriptLogger::new(&path).unwrap();

        logger.log(TranscriptEvent::new(
            "simple_event",
            serde_json::json!("just a string"),
        ));
        drop(logger);

        let records = lines(&path);
        assert_eq!(records[0]["type"], "simple_event");
        assert_eq!(records[0]["data"], "just a string");
    }

    #[test]
    fn test_event_sink_writes_tagged_events() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("events.jsonl");
        let sink = JsonlEventSink::new(&path).unwrap();
        assert_eq!(sink.path(), path.as_path());

        sink.emit(ProgressEvent::step_progress(Stage::Swarm, 0));
        sink.emit(ProgressEvent::log(Stage::Facts, "key sk-abcdefghijklmnop seen"));
        drop(sink);

        let records = lines(&path);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["type"], "step_progress");
        assert_eq!(records[0]["step"], "swarm");
        assert_eq!(records[0]["percent"], 0);
        assert_eq!(records[1]["type"], "log");
        assert_eq!(records[1]["message"], "key [REDACTED] seen");
    }

    #[test]
    fn test_unwritable_path_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "x").unwrap();
        // A regular file cannot be used as a parent directory
        assert!(JsonlEventSink::new(blocker.join("events.jsonl")).is_none());
    }
}
