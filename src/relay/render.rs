//! Turns state records into chat messages.

use chrono::{DateTime, NaiveDateTime, Utc};

use super::channel::{Embed, OutboundMessage};
use crate::models::{AlarmStatus, AlertPriority, AlertQueueEntry, UnlockMethod, UnlockStatus};

/// Side bar colour of high priority alerts.
pub const COLOR_HIGH: u32 = 0xFF0000;
/// Side bar colour of normal priority alerts.
pub const COLOR_NORMAL: u32 = 0xFFA500;
const COLOR_SUCCESS: u32 = 0x00FF00;
const COLOR_FAILURE: u32 = 0xFF0000;
const COLOR_STATUS: u32 = 0x00BFFF;
const COLOR_HELP: u32 = 0x5865F2;

/// Renders a dequeued alert.
///
/// The evidence image is attached only if it exists on disk; a missing image
/// degrades to a text-only card.
pub async fn alert(entry: &AlertQueueEntry) -> OutboundMessage {
    let color = match entry.priority {
        AlertPriority::High => COLOR_HIGH,
        AlertPriority::Normal => COLOR_NORMAL,
    };
    let embed = Embed {
        title: Some(entry.kind.title().to_string()),
        description: Some(entry.message.clone().unwrap_or_else(|| "System alert".to_string())),
        color: Some(color),
        timestamp: Some(embed_timestamp(entry.timestamp.as_deref())),
        ..Default::default()
    }
    .field("⏰ Time", entry.timestamp.clone().unwrap_or_else(|| "unknown".to_string()), true)
    .field("🔔 Priority", entry.priority.as_str(), true);

    let attachment = match &entry.image_path {
        Some(path) => match tokio::fs::metadata(path).await {
            Ok(metadata) if metadata.is_file() => Some(path.clone()),
            _ => None,
        },
        None => None,
    };
    OutboundMessage { content: None, embed: Some(embed), attachment }
}

/// The follow-up sent after every alert.
pub fn unlock_prompt(prefix: &str) -> OutboundMessage {
    OutboundMessage::text(format!(
        "🔐 **Enter the password to unlock remotely**\nFormat: `{prefix}unlock <password>`\nExample: `{prefix}unlock 1234`"
    ))
}

/// Reply to an unlock command without a password.
pub fn unlock_usage(prefix: &str) -> OutboundMessage {
    OutboundMessage::text(format!("❌ Please provide a password!\nFormat: `{prefix}unlock <password>`"))
}

/// Reply to a successful unlock.
pub fn unlock_granted(user: &str, at: DateTime<Utc>) -> OutboundMessage {
    OutboundMessage::embed(
        Embed {
            title: Some("✅ Remote verification passed!".to_string()),
            description: Some("Enter the one-time code on site to finish unlocking.".to_string()),
            color: Some(COLOR_SUCCESS),
            timestamp: Some(at.to_rfc3339()),
            ..Default::default()
        }
        .field("👤 Unlocked by", user, true)
        .field("⏰ Time", at.with_timezone(&chrono::Local).format("%Y/%m/%d %H:%M:%S").to_string(), true),
    )
}

/// Reply to a wrong password.
pub fn unlock_denied(at: DateTime<Utc>) -> OutboundMessage {
    OutboundMessage::embed(Embed {
        title: Some("❌ Wrong password".to_string()),
        description: Some("Check the password and try again.".to_string()),
        color: Some(COLOR_FAILURE),
        timestamp: Some(at.to_rfc3339()),
        ..Default::default()
    })
}

/// Reply when the unlock status could not be recorded.
pub fn unlock_failed() -> OutboundMessage {
    OutboundMessage::text("❌ System error, could not record the unlock status.")
}

/// Reply to the status command.
pub fn status(alarm: &AlarmStatus, unlock: &UnlockStatus, at: DateTime<Utc>) -> OutboundMessage {
    let mut text = String::from("📊 **Guardian system status**\n\n");

    if alarm.active {
        text.push_str("🚨 Alarm: **ACTIVE**\n");
        if let Some(kind) = alarm.visible_kind() {
            text.push_str(&format!("📋 Type: {kind}\n"));
        }
        text.push_str(&format!("⏰ Raised at: {}\n", alarm.timestamp.as_deref().unwrap_or("unknown")));
        if let Some(confidence) = alarm.visible_confidence() {
            text.push_str(&format!("📊 Confidence: {:.1}%\n", confidence * 100.0));
        }
        if let Some(countdown) = &alarm.countdown_str {
            text.push_str(&format!("⏳ Countdown: {countdown}\n"));
        }
    } else {
        text.push_str("🚨 Alarm: normal\n");
    }

    if unlock.remote_unlocked {
        text.push_str("🔓 Remote unlock: **UNLOCKED**\n");
        text.push_str(&format!("⏰ Unlocked at: {}\n", unlock.timestamp.as_deref().unwrap_or("unknown")));
        let method = match unlock.unlock_method {
            Some(UnlockMethod::Web) => "web",
            Some(UnlockMethod::Discord) => "discord",
            None => "unknown",
        };
        text.push_str(&format!("📱 Method: {method}\n"));
    } else {
        text.push_str("🔓 Remote unlock: locked\n");
    }

    OutboundMessage::embed(Embed {
        title: Some("📊 System status".to_string()),
        description: Some(text),
        color: Some(COLOR_STATUS),
        timestamp: Some(at.to_rfc3339()),
        ..Default::default()
    })
}

/// Reply to the help command.
pub fn help(prefix: &str, at: DateTime<Utc>) -> OutboundMessage {
    OutboundMessage::embed(
        Embed {
            title: Some("🤖 Guardian bot commands".to_string()),
            description: Some("Available commands:".to_string()),
            color: Some(COLOR_HELP),
            timestamp: Some(at.to_rfc3339()),
            footer: Some("Guardian Eye Security System".to_string()),
            ..Default::default()
        }
        .field(format!("{prefix}unlock <password>"), format!("Unlock remotely\nExample: `{prefix}unlock 1234`"), false)
        .field(format!("{prefix}status"), "Show the current system status", false)
        .field(format!("{prefix}help"), "Show this message", false),
    )
}

/// Best-effort conversion of a controller timestamp into RFC 3339.
///
/// Accepts RFC 3339 and the controller's `YYYY-MM-DD HH:MM:SS` local format;
/// anything else falls back to now.
fn embed_timestamp(raw: Option<&str>) -> String {
    let parsed = raw.and_then(|raw| {
        DateTime::parse_from_rfc3339(raw).map(|t| t.with_timezone(&Utc)).ok().or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
                .ok()
                .and_then(|naive| naive.and_local_timezone(chrono::Local).single())
                .map(|t| t.with_timezone(&Utc))
        })
    });
    parsed.unwrap_or_else(Utc::now).to_rfc3339()
}
