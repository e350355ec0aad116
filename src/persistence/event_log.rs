//! The bounded, newest-first event history.

use std::sync::Arc;

use tokio::sync::Mutex;

use super::{
    error::PersistenceError,
    status::StatusRepository,
    traits::{StateKey, StateStore},
};
use crate::models::EventLogEntry;

/// Maximum number of entries kept in the log.
pub const EVENT_LOG_CAPACITY: usize = 50;

/// Appends to and reads the event log.
///
/// Every append reads the full sequence, prepends, truncates and rewrites it.
/// Appends within one process are serialized; appends from two processes at
/// the same moment may still lose one of the entries.
pub struct EventLog {
    records: StatusRepository,
    capacity: usize,
    append_lock: Mutex<()>,
}

impl EventLog {
    /// Creates a log over `store` holding at most [`EVENT_LOG_CAPACITY`] entries.
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self::with_capacity(store, EVENT_LOG_CAPACITY)
    }

    /// Creates a log holding at most `capacity` entries.
    pub fn with_capacity(store: Arc<dyn StateStore>, capacity: usize) -> Self {
        Self { records: StatusRepository::new(store), capacity, append_lock: Mutex::new(()) }
    }

    /// Prepends `entry`, discarding the oldest entries beyond capacity.
    ///
    /// Fails without writing if the stored log cannot be decoded.
    pub async fn append(&self, entry: EventLogEntry) -> Result<(), PersistenceError> {
        let _guard = self.append_lock.lock().await;

        // An unreadable log is left untouched rather than overwritten.
        let mut entries = self
            .records
            .read_json::<Vec<EventLogEntry>>(StateKey::EventLog)
            .await?
            .unwrap_or_default();

        tracing::debug!(event = %entry.event, kind = %entry.kind, status = %entry.status, "Appending event.");
        entries.insert(0, entry);
        entries.truncate(self.capacity);

        self.records.write_json(StateKey::EventLog, &entries).await
    }

    /// Appends `entry`, logging instead of returning a failure.
    pub async fn record(&self, entry: EventLogEntry) {
        if let Err(e) = self.append(entry).await {
            tracing::error!(error = %e, "Failed to record event.");
        }
    }

    /// The full log, newest first.
    ///
    /// Before anything has been written, or if the log cannot be decoded, a
    /// fixed illustrative history is returned instead.
    pub async fn entries(&self) -> Vec<EventLogEntry> {
        match self.records.read_json::<Vec<EventLogEntry>>(StateKey::EventLog).await {
            Ok(Some(entries)) => entries,
            Ok(None) => sample_history(),
            Err(e) => {
                tracing::error!(error = %e, "Failed to read event log, serving sample history.");
                sample_history()
            }
        }
    }
}

/// The history shown before the log file has ever been created.
pub fn sample_history() -> Vec<EventLogEntry> {
    let entry = |time: &str, event: &str, status: &str, kind: &str| EventLogEntry {
        time: time.to_string(),
        event: event.to_string(),
        status: status.to_string(),
        kind: kind.to_string(),
    };
    vec![
        entry("2025/01/09 14:25:05", "Pig intrusion alarm", "cleared", "alarm"),
        entry("2025/01/09 10:15:32", "Stranger detected", "notified", "detection"),
        entry("2025/01/09 08:30:15", "Owner opened the door", "normal", "access"),
    ]
}
