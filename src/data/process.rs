use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Deserialize;

use crate::utils::{format_elapsed_ms, format_progress};

/// Server-reported lifecycle state of a process.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum ProcessStatus {
    NotStarted,
    Running,
    Killed,
    Finished,
    Other(String),
}

impl From<String> for ProcessStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "NOT_STARTED" => ProcessStatus::NotStarted,
            "RUNNING" => ProcessStatus::Running,
            "KILLED" => ProcessStatus::Killed,
            "FINISHED" => ProcessStatus::Finished,
            _ => ProcessStatus::Other(value),
        }
    }
}

impl ProcessStatus {
    pub fn label(&self) -> &str {
        match self {
            ProcessStatus::NotStarted => "NOT_STARTED",
            ProcessStatus::Running => "RUNNING",
            ProcessStatus::Killed => "KILLED",
            ProcessStatus::Finished => "FINISHED",
            ProcessStatus::Other(value) => value,
        }
    }

    pub fn emphasis(&self) -> RowEmphasis {
        match self {
            ProcessStatus::Running => RowEmphasis::Running,
            ProcessStatus::Killed => RowEmphasis::Killed,
            _ => RowEmphasis::Neutral,
        }
    }
}

impl fmt::Display for ProcessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Progress {
    pub current: i64,
    pub max: i64,
    pub stage: String,
}

/// One entry of `GET /admin/processes`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Process {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(rename = "db", default)]
    pub database: String,
    #[serde(default)]
    pub user: String,
    /// Unix epoch milliseconds.
    #[serde(default)]
    pub start_time: i64,
    pub status: ProcessStatus,
    #[serde(default)]
    pub progress: Progress,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowEmphasis {
    Running,
    Killed,
    Neutral,
}

/// Display projection of a [`Process`], computed when a fetch lands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcessRow {
    pub id: String,
    pub database: String,
    pub user: String,
    pub kind: String,
    pub status: String,
    pub elapsed: String,
    pub elapsed_ms: u64,
    pub progress: String,
    pub emphasis: RowEmphasis,
}

impl ProcessRow {
    pub fn from_process(process: &Process, now: SystemTime) -> Self {
        let elapsed_ms = elapsed_since(process.start_time, now);
        Self {
            id: process.id.clone(),
            database: process.database.clone(),
            user: process.user.clone(),
            kind: process.kind.clone(),
            status: process.status.label().to_string(),
            elapsed: format_elapsed_ms(elapsed_ms),
            elapsed_ms,
            progress: format_progress(
                process.progress.current,
                process.progress.max,
                &process.progress.stage,
            ),
            emphasis: process.status.emphasis(),
        }
    }

    /// Case-insensitive match against the filterable columns.
    pub fn matches(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        let needle = needle.to_lowercase();
        [
            &self.id,
            &self.database,
            &self.user,
            &self.status,
            &self.kind,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Milliseconds between `start_ms` and `now`, clamped at zero for clock skew.
fn elapsed_since(start_ms: i64, now: SystemTime) -> u64 {
    let now_ms = now
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0);
    now_ms.saturating_sub(start_ms).max(0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn sample_json() -> &'static str {
        r#"[
            {
                "type": "Query",
                "kernelId": "k-1",
                "id": "1f2e",
                "db": "movies",
                "user": "admin",
                "startTime": 1700000000000,
                "status": "RUNNING",
                "progress": {"max": 200, "current": 50, "stage": "Loading"}
            },
            {
                "type": "Transaction",
                "id": "9a9a",
                "db": "music",
                "user": "anonymous",
                "startTime": 1700000001000,
                "status": "PAUSED"
            }
        ]"#
    }

    #[test]
    fn deserializes_server_payload() {
        let processes: Vec<Process> = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(processes.len(), 2);
        assert_eq!(processes[0].kind, "Query");
        assert_eq!(processes[0].database, "movies");
        assert_eq!(processes[0].status, ProcessStatus::Running);
        assert_eq!(processes[0].progress.stage, "Loading");
        assert_eq!(
            processes[1].status,
            ProcessStatus::Other("PAUSED".to_string())
        );
        assert_eq!(processes[1].progress, Progress::default());
    }

    #[test]
    fn row_projection_formats_elapsed_and_progress() {
        let processes: Vec<Process> = serde_json::from_str(sample_json()).unwrap();
        let now = UNIX_EPOCH + Duration::from_millis(1_700_000_062_500);
        let row = ProcessRow::from_process(&processes[0], now);
        assert_eq!(row.elapsed, "1m2.5s");
        assert_eq!(row.progress, "Loading 25.00%");
        assert_eq!(row.emphasis, RowEmphasis::Running);
        assert_eq!(row.status, "RUNNING");
    }

    #[test]
    fn elapsed_clamps_future_start_times() {
        let now = UNIX_EPOCH + Duration::from_millis(1_000);
        assert_eq!(elapsed_since(5_000, now), 0);
    }

    #[test]
    fn elapsed_is_monotonic_in_now() {
        let processes: Vec<Process> = serde_json::from_str(sample_json()).unwrap();
        let t1 = UNIX_EPOCH + Duration::from_millis(1_700_000_010_000);
        let t2 = t1 + Duration::from_millis(1_234);
        let first = ProcessRow::from_process(&processes[0], t1);
        let second = ProcessRow::from_process(&processes[0], t2);
        assert!(second.elapsed_ms >= first.elapsed_ms);
    }

    #[test]
    fn emphasis_only_for_running_and_killed() {
        assert_eq!(ProcessStatus::Killed.emphasis(), RowEmphasis::Killed);
        assert_eq!(ProcessStatus::Finished.emphasis(), RowEmphasis::Neutral);
        assert_eq!(ProcessStatus::NotStarted.emphasis(), RowEmphasis::Neutral);
    }

    #[test]
    fn filter_matches_visible_text_columns() {
        let processes: Vec<Process> = serde_json::from_str(sample_json()).unwrap();
        let row = ProcessRow::from_process(&processes[0], UNIX_EPOCH);
        assert!(row.matches("MOV"));
        assert!(row.matches("query"));
        assert!(row.matches("running"));
        assert!(!row.matches("music"));
        assert!(row.matches(""));
    }
}
