//! The alarm status record written by the controller.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::alert::AlertKind;

/// Current alarm state.
///
/// When `active` is false the remaining fields may hold stale values from the
/// last alarm; they must not be shown to users. Use [`AlarmStatus::visible_kind`]
/// and [`AlarmStatus::visible_confidence`] when rendering.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AlarmStatus {
    /// Whether an alarm is currently raised.
    #[serde(rename = "alarm_active", alias = "active", default)]
    pub active: bool,

    /// What raised the alarm.
    #[serde(rename = "alarm_type", alias = "type", default)]
    pub kind: Option<AlertKind>,

    /// When the alarm was raised, as written by the controller.
    #[serde(default)]
    pub timestamp: Option<String>,

    /// Optional evidence image.
    #[serde(default)]
    pub image_path: Option<PathBuf>,

    /// Detector confidence in `[0, 1]`.
    #[serde(default)]
    pub confidence: f64,

    /// Seconds left on the controller's escalation countdown, if running.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub countdown: Option<u64>,

    /// Human-readable form of `countdown`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub countdown_str: Option<String>,
}

impl AlarmStatus {
    /// The alarm kind, only while the alarm is active.
    pub fn visible_kind(&self) -> Option<&AlertKind> {
        self.kind.as_ref().filter(|_| self.active)
    }

    /// The confidence clamped to `[0, 1]`, only while the alarm is active.
    pub fn visible_confidence(&self) -> Option<f64> {
        self.active.then(|| if self.confidence.is_nan() { 0.0 } else { self.confidence.clamp(0.0, 1.0) })
    }
}
