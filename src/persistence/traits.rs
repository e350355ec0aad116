//! The storage interface shared by every process that touches shared state.

use std::fmt;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use super::error::PersistenceError;

/// The closed set of shared state entries.
///
/// Each key is one sentinel file on disk. By convention each key has a primary
/// writer: the controller writes `AlarmStatus` and `AlertQueue`, the relay and
/// dashboard both write `UnlockStatus` and append to `EventLog`, and only the
/// dashboard writes `ControlCommand`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateKey {
    /// Current alarm state, produced by the controller.
    AlarmStatus,
    /// Remote unlock state.
    UnlockStatus,
    /// A single pending alert waiting to be delivered.
    AlertQueue,
    /// A single operator command for the controller.
    ControlCommand,
    /// The bounded, newest-first event history.
    EventLog,
}

impl StateKey {
    /// All keys, in a stable order.
    pub const ALL: [StateKey; 5] = [
        StateKey::AlarmStatus,
        StateKey::UnlockStatus,
        StateKey::AlertQueue,
        StateKey::ControlCommand,
        StateKey::EventLog,
    ];

    /// A short, stable name for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            StateKey::AlarmStatus => "alarm_status",
            StateKey::UnlockStatus => "unlock_status",
            StateKey::AlertQueue => "alert_queue",
            StateKey::ControlCommand => "control_command",
            StateKey::EventLog => "event_log",
        }
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whole-value storage keyed by [`StateKey`].
///
/// Implementations never apply partial updates: `write` replaces the entire
/// value, `read` returns `Ok(None)` when nothing is stored, and `delete` of an
/// absent key succeeds.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Returns the stored bytes, or `None` if the key is absent.
    async fn read(&self, key: StateKey) -> Result<Option<Vec<u8>>, PersistenceError>;

    /// Replaces the stored value for `key` in full.
    async fn write(&self, key: StateKey, contents: Vec<u8>) -> Result<(), PersistenceError>;

    /// Removes the value for `key`. Removing an absent key is not an error.
    async fn delete(&self, key: StateKey) -> Result<(), PersistenceError>;

    /// Reads and removes the value for `key`.
    ///
    /// The value is removed even when reading it fails, so a broken entry
    /// cannot be observed twice.
    async fn take(&self, key: StateKey) -> Result<Option<Vec<u8>>, PersistenceError> {
        let contents = self.read(key).await;
        self.delete(key).await?;
        contents
    }
}
