//! The remote unlock status record.

use serde::{Deserialize, Serialize};

/// How a remote unlock was granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnlockMethod {
    /// Through the dashboard.
    Web,
    /// Through the messaging channel.
    Discord,
}

/// Remote unlock state, read by the controller.
///
/// `remote_unlocked` is only ever set together with `password_correct`, so
/// [`UnlockStatus::awaiting_local_code`] cannot currently be true. The check is
/// kept because the dashboard contract exposes it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UnlockStatus {
    /// Set once a remote actor supplied the shared secret.
    #[serde(default)]
    pub remote_unlocked: bool,

    /// Result of the most recent successful verification.
    #[serde(default)]
    pub password_correct: bool,

    /// Time of the most recent successful unlock.
    #[serde(default)]
    pub timestamp: Option<String>,

    /// Where the unlock came from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlock_method: Option<UnlockMethod>,

    /// Identity of the remote actor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    /// Set by the controller once it has issued a local code.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub random_code_generated: bool,

    /// The local code the controller issued.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub random_code: Option<String>,
}

impl UnlockStatus {
    /// The record written after a successful verification.
    pub fn granted(method: UnlockMethod, user: Option<String>, timestamp: String) -> Self {
        Self {
            remote_unlocked: true,
            password_correct: true,
            timestamp: Some(timestamp),
            unlock_method: Some(method),
            user,
            ..Default::default()
        }
    }

    /// Remote approval given but local confirmation still outstanding.
    pub fn awaiting_local_code(&self) -> bool {
        self.remote_unlocked && !self.password_correct
    }
}
