//! Daily summary aggregation
//!
//! A streaming reduce over the event log: lines are parsed independently,
//! filtered to the requested date, and folded into per-event counts plus a
//! couple of averages. One JSON object per day is written back next to the
//! log.

use crate::EventLog;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: String,
    pub total_events: u64,
    /// Count per event tag, sorted by tag.
    pub counts: BTreeMap<String, u64>,
    /// Mean of `hook_elapsed_ms` over entries that carry it.
    pub avg_elapsed_ms: f64,
    /// Sum of `etd_generated` over entries that carry it.
    pub total_etd: f64,
}

/// Fold the log into a summary for `date`.
pub fn daily_summary(log: &EventLog, date: NaiveDate) -> DailySummary {
    let mut summary = DailySummary {
        date: date.to_string(),
        ..Default::default()
    };
    let mut elapsed_sum = 0.0;
    let mut elapsed_n = 0u64;

    for entry in log.read_all() {
        if entry.ts.date_naive() != date {
            continue;
        }
        summary.total_events += 1;
        *summary.counts.entry(entry.event.clone()).or_insert(0) += 1;

        if let Some(ms) = entry.payload.get("hook_elapsed_ms").and_then(|v| v.as_f64()) {
            elapsed_sum += ms;
            elapsed_n += 1;
        }
        if let Some(etd) = entry.payload.get("etd_generated").and_then(|v| v.as_f64()) {
            summary.total_etd += etd;
        }
    }

    if elapsed_n > 0 {
        summary.avg_elapsed_ms = elapsed_sum / elapsed_n as f64;
    }
    summary
}

/// Compute and store the summary as `summary-YYYY-MM-DD.json`. Best-effort,
/// like every other write in this crate.
pub fn write_daily_summary(log: &EventLog, date: NaiveDate) -> DailySummary {
    let summary = daily_summary(log, date);
    let path = log.dir().join(format!("summary-{}.json", summary.date));
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => {
            if let Err(e) = std::fs::write(&path, json) {
                warn!(error = %e, path = %path.display(), "summary write failed");
            }
        }
        Err(e) => warn!(error = %e, "summary serialization failed"),
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LogEntry;
    use chrono::Utc;
    use serde_json::json;
    use std::path::PathBuf;

    fn test_dir(tag: &str) -> PathBuf {
        let id = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!(
            "fieldhook-summary-{}-{}-{}",
            tag,
            std::process::id(),
            id
        ))
    }

    #[test]
    fn counts_and_averages() {
        let dir = test_dir("counts");
        let log = EventLog::new(&dir);
        log.append(&LogEntry::new(
            "post_tool",
            json!({"hook_elapsed_ms": 4.0, "etd_generated": 5000.0}),
        ));
        log.append(&LogEntry::new(
            "post_tool",
            json!({"hook_elapsed_ms": 8.0, "etd_generated": 1000.0}),
        ));
        log.append(&LogEntry::new("stop", json!({})));

        let summary = daily_summary(&log, Utc::now().date_naive());
        assert_eq!(summary.total_events, 3);
        assert_eq!(summary.counts["post_tool"], 2);
        assert_eq!(summary.counts["stop"], 1);
        assert_eq!(summary.avg_elapsed_ms, 6.0);
        assert_eq!(summary.total_etd, 6000.0);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn other_dates_are_filtered_out() {
        let dir = test_dir("dates");
        let log = EventLog::new(&dir);
        log.append(&LogEntry::new("stop", json!({})));

        let other = NaiveDate::from_ymd_opt(2001, 1, 1).unwrap();
        let summary = daily_summary(&log, other);
        assert_eq!(summary.total_events, 0);
        assert!(summary.counts.is_empty());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn summary_file_is_written() {
        let dir = test_dir("write");
        let log = EventLog::new(&dir);
        log.append(&LogEntry::new("stop", json!({})));

        let today = Utc::now().date_naive();
        let summary = write_daily_summary(&log, today);
        assert_eq!(summary.total_events, 1);
        let path = dir.join(format!("summary-{}.json", today));
        assert!(path.exists());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
