use std::path::PathBuf;

use crate::models::{AlertKind, AlertPriority, AlertQueueEntry};

/// A builder for creating `AlertQueueEntry` instances for testing.
pub struct AlertBuilder {
    entry: AlertQueueEntry,
}

impl AlertBuilder {
    /// Creates a new `AlertBuilder` for an alert of the given kind.
    pub fn new(kind: AlertKind) -> Self {
        Self {
            entry: AlertQueueEntry {
                kind,
                message: None,
                priority: AlertPriority::Normal,
                timestamp: None,
                image_path: None,
            },
        }
    }

    /// Sets the alert message.
    pub fn message(mut self, message: &str) -> Self {
        self.entry.message = Some(message.to_string());
        self
    }

    /// Marks the alert as high priority.
    pub fn high_priority(mut self) -> Self {
        self.entry.priority = AlertPriority::High;
        self
    }

    /// Sets the alert timestamp.
    pub fn timestamp(mut self, timestamp: &str) -> Self {
        self.entry.timestamp = Some(timestamp.to_string());
        self
    }

    /// Sets the evidence image path.
    pub fn image_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.entry.image_path = Some(path.into());
        self
    }

    /// Builds the `AlertQueueEntry` instance.
    pub fn build(self) -> AlertQueueEntry {
        self.entry
    }

    /// The entry as the controller would write it to the queue file.
    pub fn to_json_bytes(&self) -> Vec<u8> {
        serde_json::to_vec(&self.entry).unwrap()
    }
}
