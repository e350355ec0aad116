use crate::models::{AlarmStatus, AlertKind};

/// A builder for creating `AlarmStatus` instances for testing.
#[derive(Default)]
pub struct AlarmStatusBuilder {
    status: AlarmStatus,
}

impl AlarmStatusBuilder {
    /// Creates a builder for an inactive alarm.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raises the alarm with the given kind and confidence.
    pub fn active(mut self, kind: AlertKind, confidence: f64) -> Self {
        self.status.active = true;
        self.status.kind = Some(kind);
        self.status.confidence = confidence;
        self
    }

    /// Leaves stale alarm details behind an inactive flag.
    pub fn cleared(mut self) -> Self {
        self.status.active = false;
        self
    }

    /// Sets the alarm timestamp.
    pub fn timestamp(mut self, timestamp: &str) -> Self {
        self.status.timestamp = Some(timestamp.to_string());
        self
    }

    /// Sets the escalation countdown.
    pub fn countdown(mut self, seconds: u64) -> Self {
        self.status.countdown = Some(seconds);
        self.status.countdown_str = Some(format!("{:02}:{:02}", seconds / 60, seconds % 60));
        self
    }

    /// Builds the `AlarmStatus` instance.
    pub fn build(self) -> AlarmStatus {
        self.status
    }
}
