//! Operator commands for the controller.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A command the dashboard hands to the controller through the control file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlCommand {
    /// Open the door.
    OpenDoor,
    /// Silence the buzzer and lights without clearing the alarm.
    MuteAlarm,
    /// Clear the alarm state.
    Reset,
    /// Raise a simulated alarm.
    TestAlarm,
}

/// The token was not one of the accepted commands.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown control command: {0:?}")]
pub struct UnknownControlCommand(pub String);

impl ControlCommand {
    /// Every accepted command.
    pub const ALL: [ControlCommand; 4] =
        [ControlCommand::OpenDoor, ControlCommand::MuteAlarm, ControlCommand::Reset, ControlCommand::TestAlarm];

    /// The token written to the control file.
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlCommand::OpenDoor => "open_door",
            ControlCommand::MuteAlarm => "mute_alarm",
            ControlCommand::Reset => "reset",
            ControlCommand::TestAlarm => "test_alarm",
        }
    }
}

impl FromStr for ControlCommand {
    type Err = UnknownControlCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ControlCommand::ALL
            .into_iter()
            .find(|command| command.as_str() == s)
            .ok_or_else(|| UnknownControlCommand(s.to_string()))
    }
}

impl fmt::Display for ControlCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
