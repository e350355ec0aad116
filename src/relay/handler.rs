//! Alert delivery and chat command handling.

use std::sync::Arc;

use chrono::{SecondsFormat, Utc};

use super::{
    channel::{ChatChannel, InboundMessage},
    command::Command,
    render,
};
use crate::{
    models::{AlertQueueEntry, EventLogEntry, UnlockMethod, UnlockStatus},
    persistence::{EventLog, StatusRepository},
};

/// Delivers alerts to the chat channel and answers chat commands.
pub struct Relay {
    channel: Arc<dyn ChatChannel>,
    statuses: StatusRepository,
    event_log: Arc<EventLog>,
    unlock_secret: String,
    command_prefix: String,
}

impl Relay {
    /// Creates a relay.
    pub fn new(
        channel: Arc<dyn ChatChannel>,
        statuses: StatusRepository,
        event_log: Arc<EventLog>,
        unlock_secret: String,
        command_prefix: String,
    ) -> Self {
        Self { channel, statuses, event_log, unlock_secret, command_prefix }
    }

    /// The channel this relay talks through.
    pub fn channel(&self) -> &Arc<dyn ChatChannel> {
        &self.channel
    }

    /// Sends the rendered alert followed by the unlock prompt.
    ///
    /// Each send is attempted once. A failed alert send does not prevent the
    /// prompt, and an unresolvable destination drops the alert.
    pub async fn deliver_alert(&self, entry: &AlertQueueEntry) {
        let destination = match self.channel.resolve_destination().await {
            Ok(destination) => destination,
            Err(e) => {
                tracing::error!(kind = %entry.kind, error = %e, "No destination for alert, dropping it.");
                return;
            }
        };

        let delivered = match self.channel.send(&destination, &render::alert(entry).await).await {
            Ok(()) => {
                tracing::info!(
                    kind = %entry.kind,
                    priority = entry.priority.as_str(),
                    destination = %destination.channel_id,
                    "Alert delivered."
                );
                true
            }
            Err(e) => {
                tracing::error!(
                    kind = %entry.kind,
                    destination = %destination.channel_id,
                    error = %e,
                    "Failed to deliver alert."
                );
                false
            }
        };

        let prompt = render::unlock_prompt(&self.command_prefix);
        if let Err(e) = self.channel.send(&destination, &prompt).await {
            tracing::error!(destination = %destination.channel_id, error = %e, "Failed to send unlock prompt.");
        }

        let status = if delivered { "notified" } else { "delivery failed" };
        self.event_log.record(EventLogEntry::now(entry.kind.title(), "alert", status)).await;
    }

    /// Handles one inbound chat message.
    ///
    /// Returns the command that was acted on, or `None` when the message was
    /// ignored.
    pub async fn handle_message(&self, message: &InboundMessage) -> Option<Command> {
        if message.author.bot {
            return None;
        }
        let command = Command::parse(&message.content, &self.command_prefix)?;
        tracing::debug!(command = command.name(), user = %message.author.tag, "Handling command.");

        let reply = match &command {
            Command::Unlock(None) => render::unlock_usage(&self.command_prefix),
            Command::Unlock(Some(secret)) => self.unlock(message, secret).await,
            Command::Status => {
                let alarm = self.statuses.alarm_status().await;
                let unlock = self.statuses.unlock_status().await;
                render::status(&alarm, &unlock, Utc::now())
            }
            Command::Help => render::help(&self.command_prefix, Utc::now()),
        };

        if let Err(e) = self.channel.reply(message, &reply).await {
            tracing::error!(command = command.name(), error = %e, "Failed to reply to command.");
        }
        Some(command)
    }

    async fn unlock(&self, message: &InboundMessage, secret: &str) -> super::channel::OutboundMessage {
        let user = &message.author.tag;
        let now = Utc::now();

        if secret != self.unlock_secret {
            tracing::warn!(user = %user, "Remote unlock rejected: wrong password.");
            self.event_log
                .record(EventLogEntry::now(format!("Discord unlock attempt by {user}"), "unlock", "failed"))
                .await;
            return render::unlock_denied(now);
        }

        let status = UnlockStatus::granted(
            UnlockMethod::Discord,
            Some(user.clone()),
            now.to_rfc3339_opts(SecondsFormat::Millis, true),
        );
        match self.statuses.write_unlock_status(&status).await {
            Ok(()) => {
                self.event_log
                    .record(EventLogEntry::now(format!("Discord unlock by {user}"), "unlock", "success"))
                    .await;
                render::unlock_granted(user, now)
            }
            Err(_) => render::unlock_failed(),
        }
    }
}
