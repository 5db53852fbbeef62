//! fieldhook-log — append-only JSON-lines event log
//!
//! One serialized entry per line in `events.jsonl`. Appends are best-effort:
//! a failed write is reported through `tracing::warn!` and otherwise dropped,
//! so log I/O can never block or fail a hook invocation. The summary module
//! re-reads the file line by line, skipping anything that does not parse.

pub mod summary;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::warn;

pub use summary::{daily_summary, write_daily_summary, DailySummary};

pub const EVENTS_FILE: &str = "events.jsonl";

/// One log line: timestamp, event tag, payload.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LogEntry {
    pub ts: DateTime<Utc>,
    pub event: String,
    pub payload: Value,
}

impl LogEntry {
    pub fn new(event: impl Into<String>, payload: Value) -> Self {
        Self {
            ts: Utc::now(),
            event: event.into(),
            payload,
        }
    }
}

pub struct EventLog {
    dir: PathBuf,
}

impl EventLog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn events_path(&self) -> PathBuf {
        self.dir.join(EVENTS_FILE)
    }

    /// Append one entry. Infallible by contract: any I/O or serialization
    /// failure goes to the diagnostic channel and the caller proceeds.
    pub fn append(&self, entry: &LogEntry) {
        if let Err(e) = self.try_append(entry) {
            warn!(error = %e, dir = %self.dir.display(), "event log append failed");
        }
    }

    fn try_append(&self, entry: &LogEntry) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let line = serde_json::to_string(entry)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.events_path())?;
        file.write_all(line.as_bytes())?;
        file.write_all(b"\n")?;
        Ok(())
    }

    /// Read back all entries, skipping unparseable lines.
    pub fn read_all(&self) -> Vec<LogEntry> {
        let Ok(content) = std::fs::read_to_string(self.events_path()) else {
            return Vec::new();
        };
        content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_dir(tag: &str) -> PathBuf {
        let id = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("fieldhook-log-{}-{}-{}", tag, std::process::id(), id))
    }

    #[test]
    fn append_then_read_back() {
        let dir = test_dir("roundtrip");
        let log = EventLog::new(&dir);
        log.append(&LogEntry::new("post_tool", json!({"tool_name": "bash"})));
        log.append(&LogEntry::new("stop", json!({})));

        let entries = log.read_all();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].event, "post_tool");
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn append_failure_does_not_panic() {
        // A path that cannot be a directory: a file sits where the dir goes.
        let dir = test_dir("blocked");
        std::fs::write(&dir, b"occupied").unwrap();
        let log = EventLog::new(&dir);
        log.append(&LogEntry::new("post_tool", json!({})));
        let _ = std::fs::remove_file(&dir);
    }

    #[test]
    fn corrupt_lines_are_skipped() {
        let dir = test_dir("corrupt");
        let log = EventLog::new(&dir);
        log.append(&LogEntry::new("stop", json!({})));
        {
            let mut file = OpenOptions::new()
                .append(true)
                .open(log.events_path())
                .unwrap();
            file.write_all(b"not json at all\n{\"half\": \n").unwrap();
        }
        log.append(&LogEntry::new("stop", json!({})));

        assert_eq!(log.read_all().len(), 2);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_file_reads_empty() {
        let log = EventLog::new(test_dir("missing"));
        assert!(log.read_all().is_empty());
    }
}
