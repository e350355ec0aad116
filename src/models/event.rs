//! Event log entries.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// How a front end should style an entry, derived from its free-text status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventClass {
    /// The event completed as intended.
    Success,
    /// The event was a failure or was refused.
    Failed,
    /// Anything else.
    Normal,
}

const SUCCESS_MARKERS: [&str; 6] = ["success", "cleared", "normal", "成功", "正常", "已解除"];
const FAILED_MARKERS: [&str; 4] = ["fail", "失敗", "錯誤", "error"];

/// One record in the event log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLogEntry {
    /// Local wall-clock time of the event.
    #[serde(default)]
    pub time: String,
    /// What happened.
    #[serde(default)]
    pub event: String,
    /// Outcome, free text.
    #[serde(default)]
    pub status: String,
    /// Category, free text (`unlock`, `alert`, `control`, ...).
    #[serde(rename = "type", default)]
    pub kind: String,
}

impl EventLogEntry {
    /// Creates an entry stamped with the current local time.
    pub fn now(event: impl Into<String>, kind: impl Into<String>, status: impl Into<String>) -> Self {
        Self::at(Local::now(), event, kind, status)
    }

    /// Creates an entry stamped with `time`.
    pub fn at(
        time: DateTime<Local>,
        event: impl Into<String>,
        kind: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        Self {
            time: time.format("%Y/%m/%d %H:%M:%S").to_string(),
            event: event.into(),
            status: status.into(),
            kind: kind.into(),
        }
    }

    /// Classifies `status` by substring match, success markers first.
    pub fn class(&self) -> EventClass {
        let status = self.status.to_lowercase();
        if SUCCESS_MARKERS.iter().any(|m| status.contains(m)) {
            EventClass::Success
        } else if FAILED_MARKERS.iter().any(|m| status.contains(m)) {
            EventClass::Failed
        } else {
            EventClass::Normal
        }
    }
}
