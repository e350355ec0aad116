//! Polls the destination channel for chat commands.

use std::sync::Arc;

use tokio::sync::Mutex;

use super::{Relay, channel::Destination};

#[derive(Debug, Default)]
struct Cursor {
    destination: Option<Destination>,
    last_seen: Option<String>,
    primed: bool,
}

/// Feeds new channel messages to the [`Relay`].
///
/// The first successful poll only records the newest message id, so commands
/// posted before the relay started are never replayed.
pub struct CommandListener {
    relay: Arc<Relay>,
    cursor: Mutex<Cursor>,
}

impl CommandListener {
    /// Creates a listener for `relay`'s channel.
    pub fn new(relay: Arc<Relay>) -> Self {
        Self { relay, cursor: Mutex::new(Cursor::default()) }
    }

    /// Fetches and handles messages posted since the last poll. Returns how
    /// many commands were handled.
    pub async fn poll(&self) -> usize {
        let mut cursor = self.cursor.lock().await;
        let channel = self.relay.channel();

        let destination = match &cursor.destination {
            Some(destination) => destination.clone(),
            None => match channel.resolve_destination().await {
                Ok(destination) => {
                    tracing::info!(destination = %destination.channel_id, "Listening for commands.");
                    cursor.destination = Some(destination.clone());
                    destination
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Cannot listen for commands yet.");
                    return 0;
                }
            },
        };

        let messages = match channel.fetch_messages(&destination, cursor.last_seen.clone()).await {
            Ok(messages) => messages,
            Err(e) => {
                tracing::error!(destination = %destination.channel_id, error = %e, "Failed to fetch messages.");
                return 0;
            }
        };

        if let Some(newest) = messages.last() {
            cursor.last_seen = Some(newest.id.clone());
        }
        if !cursor.primed {
            cursor.primed = true;
            tracing::debug!(skipped = messages.len(), "Command cursor primed.");
            return 0;
        }

        let mut handled = 0;
        for message in &messages {
            if self.relay.handle_message(message).await.is_some() {
                handled += 1;
            }
        }
        handled
    }
}
