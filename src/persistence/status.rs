//! Typed reads and writes of the status records.

use std::sync::Arc;

use serde::{Serialize, de::DeserializeOwned};

use super::{
    error::PersistenceError,
    traits::{StateKey, StateStore},
};
use crate::models::{AlarmStatus, ControlCommand, UnlockStatus};

/// JSON access to the shared status records on top of a [`StateStore`].
///
/// Status reads never fail: an absent or unparseable record is logged and
/// replaced by its default. Writes log their own failures and then return
/// them, so callers may choose to surface them without re-logging.
#[derive(Clone)]
pub struct StatusRepository {
    store: Arc<dyn StateStore>,
}

impl StatusRepository {
    /// Wraps a store.
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self { store }
    }

    /// Reads and decodes `key`. `Ok(None)` if absent, `Err` if unreadable or
    /// not valid JSON for `T`.
    pub async fn read_json<T: DeserializeOwned>(&self, key: StateKey) -> Result<Option<T>, PersistenceError> {
        match self.store.read(key).await? {
            Some(bytes) => serde_json::from_slice(&bytes)
                .map(Some)
                .map_err(|source| PersistenceError::Serialization { key, source }),
            None => Ok(None),
        }
    }

    /// Encodes `value` as pretty JSON and replaces `key` with it.
    pub async fn write_json<T: Serialize + Sync>(&self, key: StateKey, value: &T) -> Result<(), PersistenceError> {
        let result = match serde_json::to_vec_pretty(value) {
            Ok(bytes) => self.store.write(key, bytes).await,
            Err(source) => Err(PersistenceError::Serialization { key, source }),
        };
        match &result {
            Ok(()) => tracing::debug!(key = %key, "State record written."),
            Err(e) => tracing::error!(key = %key, error = %e, "Failed to write state record."),
        }
        result
    }

    /// Reads `key`, substituting the default for absent or broken records.
    async fn read_or_default<T: DeserializeOwned + Default>(&self, key: StateKey) -> T {
        match self.read_json(key).await {
            Ok(Some(value)) => value,
            Ok(None) => T::default(),
            Err(e) => {
                tracing::error!(key = %key, error = %e, "Failed to read state record, using defaults.");
                T::default()
            }
        }
    }

    /// The current alarm status, or the inactive default.
    pub async fn alarm_status(&self) -> AlarmStatus {
        self.read_or_default(StateKey::AlarmStatus).await
    }

    /// The current unlock status, or the not-unlocked default.
    pub async fn unlock_status(&self) -> UnlockStatus {
        self.read_or_default(StateKey::UnlockStatus).await
    }

    /// Replaces the unlock status.
    pub async fn write_unlock_status(&self, status: &UnlockStatus) -> Result<(), PersistenceError> {
        self.write_json(StateKey::UnlockStatus, status).await?;
        tracing::info!(
            remote_unlocked = status.remote_unlocked,
            method = ?status.unlock_method,
            user = status.user.as_deref().unwrap_or("-"),
            "Unlock status updated."
        );
        Ok(())
    }

    /// Replaces the unlock status with the not-unlocked defaults.
    pub async fn reset_unlock_status(&self) -> Result<(), PersistenceError> {
        self.write_unlock_status(&UnlockStatus::default()).await
    }

    /// Replaces the control file with exactly the command token.
    pub async fn write_control_command(&self, command: ControlCommand) -> Result<(), PersistenceError> {
        match self.store.write(StateKey::ControlCommand, command.as_str().as_bytes().to_vec()).await {
            Ok(()) => {
                tracing::info!(action = %command, "Control command written.");
                Ok(())
            }
            Err(e) => {
                tracing::error!(action = %command, error = %e, "Failed to write control command.");
                Err(e)
            }
        }
    }
}
