//! Alert kinds and the single-entry alert queue record.

use std::{fmt, path::PathBuf};

use serde::{Deserialize, Serialize};

/// The kind of incident the controller reports.
///
/// The controller sometimes writes short forms (`pig`, `stranger`); those map
/// onto the canonical kinds. Anything unrecognized is kept verbatim so a new
/// kind on the controller side does not make the whole record unreadable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AlertKind {
    /// A toy pig crossed the perimeter. The highest severity alarm.
    PigIntrusion,
    /// An unrecognized face was detected.
    StrangerDetected,
    /// Generic motion.
    MotionDetected,
    /// The door was opened without authorization.
    DoorForced,
    /// A one-time local code issued by the controller after remote approval.
    VerificationCode,
    /// A kind this build does not know about.
    Other(String),
}

impl AlertKind {
    /// The canonical wire name.
    pub fn as_str(&self) -> &str {
        match self {
            AlertKind::PigIntrusion => "pig_intrusion",
            AlertKind::StrangerDetected => "stranger_detected",
            AlertKind::MotionDetected => "motion_detected",
            AlertKind::DoorForced => "door_forced",
            AlertKind::VerificationCode => "verification_code",
            AlertKind::Other(other) => other,
        }
    }

    /// The headline shown to recipients.
    pub fn title(&self) -> &'static str {
        match self {
            AlertKind::PigIntrusion => "🐷 Pig intrusion alarm!",
            AlertKind::StrangerDetected => "👤 Stranger detected!",
            AlertKind::MotionDetected => "🚶 Motion detected!",
            AlertKind::DoorForced => "🚪 Door forced open!",
            AlertKind::VerificationCode => "🔑 Local verification code",
            AlertKind::Other(_) => "🚨 System alert",
        }
    }
}

impl From<String> for AlertKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "pig_intrusion" | "pig" => AlertKind::PigIntrusion,
            "stranger_detected" | "stranger" => AlertKind::StrangerDetected,
            "motion_detected" | "motion" => AlertKind::MotionDetected,
            "door_forced" | "door" => AlertKind::DoorForced,
            "verification_code" => AlertKind::VerificationCode,
            _ => AlertKind::Other(value),
        }
    }
}

impl From<AlertKind> for String {
    fn from(kind: AlertKind) -> Self {
        match kind {
            AlertKind::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Delivery severity. Anything other than `high` is treated as `normal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AlertPriority {
    /// Rendered in red.
    High,
    /// Rendered in orange.
    #[default]
    Normal,
}

impl AlertPriority {
    /// The wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertPriority::High => "high",
            AlertPriority::Normal => "normal",
        }
    }
}

impl From<String> for AlertPriority {
    fn from(value: String) -> Self {
        if value == "high" { AlertPriority::High } else { AlertPriority::Normal }
    }
}

impl From<AlertPriority> for String {
    fn from(priority: AlertPriority) -> Self {
        priority.as_str().to_string()
    }
}

/// Exactly one pending alert, as written by the controller.
///
/// The file's existence is the signal; removing it acknowledges consumption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertQueueEntry {
    /// What happened.
    #[serde(rename = "type")]
    pub kind: AlertKind,

    /// Free-text description.
    #[serde(default)]
    pub message: Option<String>,

    /// Delivery severity.
    #[serde(default)]
    pub priority: AlertPriority,

    /// When the controller raised the alert.
    #[serde(default)]
    pub timestamp: Option<String>,

    /// Optional evidence image on the controller host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_path: Option<PathBuf>,
}
