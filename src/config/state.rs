use std::path::{Path, PathBuf};

use serde::Deserialize;

const ALARM_STATUS_FILE: &str = "guardian_alarm_status.json";
const UNLOCK_STATUS_FILE: &str = "guardian_unlock_status.json";
const ALERT_QUEUE_FILE: &str = "guardian_discord_queue.json";
const CONTROL_COMMAND_FILE: &str = "guardian_control.txt";
const EVENT_LOG_FILE: &str = "guardian_logs.json";

/// Locations of the shared state files.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct StateFilesConfig {
    /// Alarm status, written by the controller.
    pub alarm_status: PathBuf,
    /// Unlock status, written by the relay and the dashboard.
    pub unlock_status: PathBuf,
    /// Single pending alert, written by the controller and consumed by the relay.
    pub alert_queue: PathBuf,
    /// Operator command, written by the dashboard and consumed by the controller.
    pub control_command: PathBuf,
    /// Event history.
    pub event_log: PathBuf,
}

impl StateFilesConfig {
    /// The standard file names placed under `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            alarm_status: dir.join(ALARM_STATUS_FILE),
            unlock_status: dir.join(UNLOCK_STATUS_FILE),
            alert_queue: dir.join(ALERT_QUEUE_FILE),
            control_command: dir.join(CONTROL_COMMAND_FILE),
            event_log: dir.join(EVENT_LOG_FILE),
        }
    }
}

impl Default for StateFilesConfig {
    fn default() -> Self {
        Self::in_dir("/tmp")
    }
}
